use glam::Vec3;

// Scene tuning constants shared by the core state and the native frontend.

// Camera poses
pub const INITIAL_CAMERA_POSITION: [f32; 3] = [-92.25, 14.05, 29.97];
pub const CANONICAL_CAMERA_POSITION: [f32; 3] = [-92.25, 12.30, 29.97]; // restart + final snap
pub const CAMERA_LOOK_TARGET: [f32; 3] = [0.0, 0.0, 0.0];
pub const INITIAL_YAW_DEG: f32 = -90.0;
pub const INITIAL_PITCH_DEG: f32 = 0.0;
pub const PITCH_LIMIT_DEG: f32 = 89.0;

// Projection
pub const FOV_Y_DEG: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

// Opening cinematic (speeds are per frame, not per second)
pub const INTRO_FORWARD_SECS: f64 = 4.0;
pub const INTRO_FORWARD_SPEED: f32 = 0.7;
pub const INTRO_ORBIT_SECS: f64 = 18.0;
pub const INTRO_YAW_STEP_DEG: f32 = 0.7;
pub const INTRO_RISE_SECS: f64 = 5.0;
pub const INTRO_RISE_SPEED: f32 = 0.1;
pub const INTRO_SNAP_SECS: f64 = 5.0;

// Rotating wheel
pub const WHEEL_PIVOT: [f32; 3] = [54.69, 19.73, -55.22];
pub const WHEEL_SPEED_DEG_PER_SEC: f32 = 30.0;

// Orbiting shadow light
pub const LIGHT_ORBIT_RADIUS: f32 = 30.0;
pub const LIGHT_ORBIT_HEIGHT: f32 = 10.0;
pub const LIGHT_DIRECTION: [f32; 3] = [0.0, 1.0, 1.0];
pub const LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Shadow map
pub const SHADOW_MAP_SIZE: u32 = 1024;
pub const SHADOW_ORTHO_HALF_EXTENT: f32 = 20.0;
pub const SHADOW_NEAR: f32 = 1.0;
pub const SHADOW_FAR: f32 = 50.0;
/// Depth offset subtracted before the shadow comparison; without it lit
/// surfaces shadow themselves in a moire pattern.
pub const SHADOW_BIAS: f32 = 0.005;

// Point light
pub const POINT_LIGHT_POSITION: [f32; 3] = [-30.35, 16.25, 64.9];
pub const POINT_LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 0.8];
pub const POINT_LIGHT_CONSTANT: f32 = 1.0;
pub const POINT_LIGHT_LINEAR: f32 = 0.09;
pub const POINT_LIGHT_QUADRATIC: f32 = 0.032;

// Fog
pub const FOG_START: f32 = 100.0;
pub const FOG_END: f32 = 700.0;
pub const FOG_STEP: f32 = 50.0;
pub const FOG_COLOR: [f32; 3] = [0.7, 0.7, 0.7];

#[inline]
pub fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

// Held-key controls (per frame)
pub const CAMERA_SPEED: f32 = 1.0;
pub const KEY_YAW_STEP_DEG: f32 = 1.0;
pub const LIGHT_ORBIT_STEP_DEG: f32 = 1.0;
