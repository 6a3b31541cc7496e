pub mod keyboard;
pub mod pointer;

pub use keyboard::{command_for_key, Command, KeyTable};
pub use pointer::MouseLook;
