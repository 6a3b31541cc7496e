pub mod animation;
pub mod camera;
pub mod constants;
pub mod error;
pub mod lighting;
pub mod scene;
pub mod shader;
pub mod transform;
pub mod uniforms;

pub static DEPTH_WGSL: &str = include_str!("../shaders/depth.wgsl");
pub static LIT_WGSL: &str = include_str!("../shaders/lit.wgsl");

pub use animation::*;
pub use camera::*;
pub use constants::*;
pub use error::SetupError;
pub use lighting::*;
pub use scene::*;
pub use transform::*;
pub use uniforms::*;
