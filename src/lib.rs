//! Native frontend: window, input and the two-pass wgpu renderer around the
//! platform-independent `scene_core` state.

pub mod constants;
pub mod diagnostics;
pub mod events;
pub mod frame;
pub mod render;

pub use frame::{FrameContext, FrameOutcome};
pub use render::GpuState;
