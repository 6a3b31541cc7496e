// Host-side tests for fog, lights, and the shared light-space transform.

use glam::Vec3;
use scene_core::shader::unresolved_fields;
use scene_core::{
    in_shadow, shadow_coords, DirectionalLight, Fog, FrameUniforms, PointLight, Scene, DEPTH_WGSL,
    LIT_WGSL, SHADOW_BIAS,
};

#[test]
fn fog_factor_ramps_linearly() {
    let fog = Fog::default();
    assert_eq!(fog.factor(0.0), 0.0);
    assert_eq!(fog.factor(fog.start), 0.0);
    assert_eq!(fog.factor(fog.end), 1.0);
    assert_eq!(fog.factor(fog.end + 500.0), 1.0);
    let mid = (fog.start + fog.end) / 2.0;
    assert!((fog.factor(mid) - 0.5).abs() < 1e-6);
}

#[test]
fn fog_shrink_stops_past_start() {
    let mut fog = Fog::default();
    for _ in 0..100 {
        fog.shrink();
    }
    assert_eq!(fog.end, fog.start + 1.0);
    fog.extend();
    assert_eq!(fog.end, fog.start + 51.0);
}

#[test]
fn light_orbit_wraps() {
    let mut light = DirectionalLight::default();
    light.orbit_by(-1.0);
    assert_eq!(light.orbit_angle(), 359.0);
    light.orbit_by(362.0);
    assert!((light.orbit_angle() - 1.0).abs() < 1e-4);
}

#[test]
fn point_light_attenuation() {
    let p = PointLight::default();
    assert_eq!(p.attenuation(0.0), 1.0 / p.constant);
    assert!(p.attenuation(10.0) < p.attenuation(5.0));
}

#[test]
fn shadow_comparison_applies_bias() {
    assert_eq!(SHADOW_BIAS, 0.005);
    assert!(!in_shadow(0.5, 0.5, SHADOW_BIAS));
    assert!(!in_shadow(0.504, 0.5, SHADOW_BIAS));
    assert!(in_shadow(0.506, 0.5, SHADOW_BIAS));
}

#[test]
fn origin_projects_to_shadow_map_centre() {
    let light = DirectionalLight::default();
    let c = shadow_coords(light.light_space_matrix(), Vec3::ZERO);
    assert!((c.x - 0.5).abs() < 1e-5 && (c.y - 0.5).abs() < 1e-5);
    assert!(c.z > 0.0 && c.z < 1.0);
}

#[test]
fn both_passes_read_one_light_space_matrix() {
    let mut scene = Scene::default();
    scene.light.orbit_by(37.0);
    scene.advance(0.1);
    let snapshot = scene.snapshot(4.0 / 3.0);
    assert_eq!(snapshot.light_space, scene.light.light_space_matrix());

    let uploaded = FrameUniforms::from_snapshot(&snapshot).light_space;
    let derived = snapshot.light_space.to_cols_array_2d();
    for (u, d) in uploaded.iter().flatten().zip(derived.iter().flatten()) {
        assert_eq!(u.to_bits(), d.to_bits());
    }

    // Both shaders declare the field they read it from.
    assert!(unresolved_fields(DEPTH_WGSL, "FrameUniforms", &["light_space"]).is_empty());
    assert!(unresolved_fields(LIT_WGSL, "FrameUniforms", &["light_space"]).is_empty());
}

#[test]
fn bundled_shaders_declare_every_uniform() {
    for wgsl in [DEPTH_WGSL, LIT_WGSL] {
        assert!(unresolved_fields(wgsl, "FrameUniforms", &FrameUniforms::FIELDS).is_empty());
        assert!(unresolved_fields(wgsl, "ObjectUniforms", &scene_core::ObjectUniforms::FIELDS).is_empty());
    }
    assert_eq!(
        unresolved_fields(LIT_WGSL, "FrameUniforms", &["light_space", "shadow_strength"]),
        vec!["shadow_strength"]
    );
}
