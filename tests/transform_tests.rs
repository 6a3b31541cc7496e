// Host-side tests for wheel rotation and normal matrices.

use glam::{Mat3, Mat4, Vec3};
use scene_core::{normal_matrix, wrap_degrees, Camera, SceneTransforms, Wheel};

#[test]
fn wheel_wraps_after_a_full_turn() {
    let mut wheel = Wheel::default();
    wheel.advance(13.0);
    assert!((wheel.angle() - 30.0).abs() < 1e-4, "angle {}", wheel.angle());
}

#[test]
fn wheel_wraps_when_stepped_per_frame() {
    let mut wheel = Wheel::default();
    for _ in 0..(13 * 60) {
        wheel.advance(1.0 / 60.0);
        assert!((0.0..360.0).contains(&wheel.angle()));
    }
    assert!((wheel.angle() - 30.0).abs() < 1e-2, "angle {}", wheel.angle());
}

#[test]
fn wrap_degrees_stays_in_range() {
    assert_eq!(wrap_degrees(360.0), 0.0);
    assert_eq!(wrap_degrees(-30.0), 330.0);
    assert!(wrap_degrees(-1e-9) < 360.0);
}

#[test]
fn wheel_rotates_about_its_pivot() {
    let mut wheel = Wheel::default();
    wheel.advance(3.0);
    let model = wheel.model_matrix();
    assert!((model.transform_point3(wheel.pivot) - wheel.pivot).length() < 1e-3);
}

#[test]
fn normal_matrix_of_rigid_transform_is_its_rotation() {
    let view = Camera::initial().view_matrix();
    let model = Mat4::from_rotation_x(0.6) * Mat4::from_translation(Vec3::new(3.0, -2.0, 1.0));
    let n = normal_matrix(view, model);
    let r = Mat3::from_mat4(view * model);
    for (a, b) in n.to_cols_array().iter().zip(r.to_cols_array()) {
        assert!((a - b).abs() < 1e-4);
    }
}

#[test]
fn scene_root_is_identity() {
    let view = Camera::initial().view_matrix();
    let t = SceneTransforms::compute(view, &Wheel::default());
    assert_eq!(t.scene_root.model, Mat4::IDENTITY);
    assert_eq!(t.wheel.model, Wheel::default().model_matrix());
}
