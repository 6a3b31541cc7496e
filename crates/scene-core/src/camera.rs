//! Free-flying camera driven by yaw/pitch angles.
//!
//! The camera never clamps its own angles. Mouse look (and anything else that
//! accumulates pitch) clamps through [`LookAngles`] before calling
//! [`Camera::rotate`], so a raw `rotate(95.0, ..)` is taken at face value.

use crate::constants::{
    vec3, CAMERA_LOOK_TARGET, CANONICAL_CAMERA_POSITION, FOV_Y_DEG, INITIAL_CAMERA_POSITION,
    INITIAL_PITCH_DEG, INITIAL_YAW_DEG, PITCH_LIMIT_DEG, Z_FAR, Z_NEAR,
};
use glam::{Mat4, Vec3};

pub const WORLD_UP: Vec3 = Vec3::Y;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw_deg: f32,
    pitch_deg: f32,
}

impl Camera {
    pub fn new(position: Vec3, yaw_deg: f32, pitch_deg: f32) -> Self {
        Self {
            position,
            yaw_deg,
            pitch_deg,
        }
    }

    /// Build a camera at `position` facing `target`, deriving yaw/pitch from
    /// the direction. A degenerate direction falls back to the initial angles.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let dir = (target - position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return Self::new(position, INITIAL_YAW_DEG, INITIAL_PITCH_DEG);
        }
        let pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees();
        let yaw = dir.z.atan2(dir.x).to_degrees();
        Self::new(position, yaw, pitch)
    }

    /// Pose the application opens with.
    pub fn initial() -> Self {
        Self::looking_at(vec3(INITIAL_CAMERA_POSITION), vec3(CAMERA_LOOK_TARGET))
    }

    /// Pose restored by an animation restart and by the final intro phase.
    pub fn canonical() -> Self {
        Self::looking_at(vec3(CANONICAL_CAMERA_POSITION), vec3(CAMERA_LOOK_TARGET))
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw_deg
    }

    pub fn pitch(&self) -> f32 {
        self.pitch_deg
    }

    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw_deg.to_radians(), self.pitch_deg.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(WORLD_UP).normalize()
    }

    /// Translate along one of the camera basis vectors. Up/Down use world-up.
    pub fn move_in(&mut self, direction: MoveDirection, speed: f32) {
        let delta = match direction {
            MoveDirection::Forward => self.front(),
            MoveDirection::Backward => -self.front(),
            MoveDirection::Right => self.right(),
            MoveDirection::Left => -self.right(),
            MoveDirection::Up => WORLD_UP,
            MoveDirection::Down => -WORLD_UP,
        };
        self.position += delta * speed;
    }

    /// Set absolute orientation. Callers clamp pitch; this does not.
    pub fn rotate(&mut self, pitch_deg: f32, yaw_deg: f32) {
        self.pitch_deg = pitch_deg;
        self.yaw_deg = yaw_deg;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), WORLD_UP)
    }
}

/// Perspective projection for the lit pass.
pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(FOV_Y_DEG.to_radians(), aspect, Z_NEAR, Z_FAR)
}

/// Controller-side orientation accumulated from mouse look, Q/E and the
/// scripted yaw sweep. Applied to the camera with [`LookAngles::apply_to`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for LookAngles {
    fn default() -> Self {
        Self {
            yaw: INITIAL_YAW_DEG,
            pitch: INITIAL_PITCH_DEG,
        }
    }
}

impl LookAngles {
    /// Accumulate a look delta, clamping pitch into the safe range.
    pub fn add(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    pub fn apply_to(&self, camera: &mut Camera) {
        camera.rotate(self.pitch, self.yaw);
    }
}
