//! Lights, fog and the shadow-map math shared by both render passes.

use crate::constants::{
    vec3, FOG_COLOR, FOG_END, FOG_START, FOG_STEP, LIGHT_COLOR, LIGHT_DIRECTION,
    LIGHT_ORBIT_HEIGHT, LIGHT_ORBIT_RADIUS, POINT_LIGHT_COLOR, POINT_LIGHT_CONSTANT,
    POINT_LIGHT_LINEAR, POINT_LIGHT_POSITION, POINT_LIGHT_QUADRATIC, SHADOW_FAR,
    SHADOW_NEAR, SHADOW_ORTHO_HALF_EXTENT,
};
use crate::transform::wrap_degrees;
use glam::{Mat4, Vec3};

/// Directional light. Shadows are cast from a position revolving on a
/// horizontal circle; diffuse shading uses the fixed `direction`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub color: Vec3,
    pub orbit_radius: f32,
    pub orbit_height: f32,
    orbit_angle_deg: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: vec3(LIGHT_DIRECTION),
            color: vec3(LIGHT_COLOR),
            orbit_radius: LIGHT_ORBIT_RADIUS,
            orbit_height: LIGHT_ORBIT_HEIGHT,
            orbit_angle_deg: 0.0,
        }
    }
}

impl DirectionalLight {
    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle_deg
    }

    pub fn orbit_by(&mut self, delta_deg: f32) {
        self.orbit_angle_deg = wrap_degrees(self.orbit_angle_deg + delta_deg);
    }

    pub fn position(&self) -> Vec3 {
        let a = self.orbit_angle_deg.to_radians();
        Vec3::new(
            self.orbit_radius * a.cos(),
            self.orbit_height,
            self.orbit_radius * a.sin(),
        )
    }

    /// Orthographic light projection times the look-at from the light to the
    /// world origin. Both passes must consume this single value.
    pub fn light_space_matrix(&self) -> Mat4 {
        light_space_matrix(self.position())
    }
}

pub fn light_space_matrix(light_pos: Vec3) -> Mat4 {
    let view = Mat4::look_at_rh(light_pos, Vec3::ZERO, Vec3::Y);
    let e = SHADOW_ORTHO_HALF_EXTENT;
    let projection = Mat4::orthographic_rh(-e, e, -e, e, SHADOW_NEAR, SHADOW_FAR);
    projection * view
}

/// Project a world position into shadow-map space: xy in texture coordinates
/// (v pointing down), z the depth as seen from the light.
pub fn shadow_coords(light_space: Mat4, world_pos: Vec3) -> Vec3 {
    let clip = light_space * world_pos.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    Vec3::new(ndc.x * 0.5 + 0.5, -ndc.y * 0.5 + 0.5, ndc.z)
}

/// True when the fragment is further from the light than the stored depth by
/// more than `bias`. Mirrors the comparison in the lit shader.
#[inline]
pub fn in_shadow(fragment_depth: f32, stored_depth: f32, bias: f32) -> bool {
    fragment_depth - bias > stored_depth
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: vec3(POINT_LIGHT_POSITION),
            color: vec3(POINT_LIGHT_COLOR),
            constant: POINT_LIGHT_CONSTANT,
            linear: POINT_LIGHT_LINEAR,
            quadratic: POINT_LIGHT_QUADRATIC,
        }
    }
}

impl PointLight {
    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

/// Linear distance fog.
#[derive(Clone, Debug, PartialEq)]
pub struct Fog {
    pub start: f32,
    pub end: f32,
    pub color: Vec3,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            start: FOG_START,
            end: FOG_END,
            color: vec3(FOG_COLOR),
        }
    }
}

impl Fog {
    /// 0 at or before `start`, 1 at or beyond `end`, linear in between.
    pub fn factor(&self, distance: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if distance <= self.start { 0.0 } else { 1.0 };
        }
        ((distance - self.start) / span).clamp(0.0, 1.0)
    }

    pub fn extend(&mut self) {
        self.end += FOG_STEP;
    }

    /// Pull the far edge in, never closer than one unit past `start`.
    pub fn shrink(&mut self) {
        self.end -= FOG_STEP;
        if self.end <= self.start {
            self.end = self.start + 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_starts_on_positive_x() {
        let light = DirectionalLight::default();
        let p = light.position();
        assert!((p - Vec3::new(LIGHT_ORBIT_RADIUS, LIGHT_ORBIT_HEIGHT, 0.0)).length() < 1e-5);
    }

    #[test]
    fn attenuation_is_one_at_source() {
        assert!((PointLight::default().attenuation(0.0) - 1.0).abs() < 1e-6);
    }
}
