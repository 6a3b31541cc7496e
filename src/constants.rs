/// Window and input tuning for the native frontend.
///
/// Scene-level constants (camera poses, intro timings, lights, fog) live in
/// `scene_core::constants`; these only concern the window and the devices.
pub const WINDOW_WIDTH: u32 = 1024;
pub const WINDOW_HEIGHT: u32 = 768;
pub const WINDOW_TITLE: &str = "Valhalla in the Snow";

// Degrees of look rotation per pixel of cursor travel
pub const MOUSE_SENSITIVITY: f32 = 0.1;

// Mouse look starts captured
pub const START_WITH_MOUSE_CAPTURED: bool = true;

// Relative to the working directory
pub const SCENE_MODEL_PATH: &str = "models/final_scene.glb";
pub const WHEEL_MODEL_PATH: &str = "models/wheel.glb";
