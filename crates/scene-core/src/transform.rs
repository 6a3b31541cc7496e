//! Model and normal matrices for the two fixed drawables.

use crate::constants::{vec3, WHEEL_PIVOT, WHEEL_SPEED_DEG_PER_SEC};
use glam::{Mat3, Mat4, Vec3};

/// The rotating wheel: spins about the X axis through a fixed pivot.
#[derive(Clone, Debug, PartialEq)]
pub struct Wheel {
    pub pivot: Vec3,
    pub speed_deg_per_sec: f32,
    angle_deg: f32,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(vec3(WHEEL_PIVOT), WHEEL_SPEED_DEG_PER_SEC)
    }
}

impl Wheel {
    pub fn new(pivot: Vec3, speed_deg_per_sec: f32) -> Self {
        Self {
            pivot,
            speed_deg_per_sec,
            angle_deg: 0.0,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle_deg
    }

    /// Advance by elapsed seconds, keeping the angle in [0, 360).
    pub fn advance(&mut self, dt_sec: f32) {
        self.angle_deg = wrap_degrees(self.angle_deg + self.speed_deg_per_sec * dt_sec);
    }

    pub fn model_matrix(&self) -> Mat4 {
        pivot_rotation_x(self.pivot, self.angle_deg)
    }
}

#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// translate(pivot) * rotateX(angle) * translate(-pivot)
pub fn pivot_rotation_x(pivot: Vec3, angle_deg: f32) -> Mat4 {
    Mat4::from_translation(pivot)
        * Mat4::from_rotation_x(angle_deg.to_radians())
        * Mat4::from_translation(-pivot)
}

/// transpose(inverse(mat3(view * model)))
pub fn normal_matrix(view: Mat4, model: Mat4) -> Mat3 {
    Mat3::from_mat4(view * model).inverse().transpose()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectTransform {
    pub model: Mat4,
    pub normal: Mat3,
}

impl ObjectTransform {
    pub fn new(view: Mat4, model: Mat4) -> Self {
        Self {
            model,
            normal: normal_matrix(view, model),
        }
    }
}

/// Per-frame transforms of the scene root (identity) and the wheel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTransforms {
    pub scene_root: ObjectTransform,
    pub wheel: ObjectTransform,
}

impl SceneTransforms {
    pub fn compute(view: Mat4, wheel: &Wheel) -> Self {
        Self {
            scene_root: ObjectTransform::new(view, Mat4::IDENTITY),
            wheel: ObjectTransform::new(view, wheel.model_matrix()),
        }
    }
}
