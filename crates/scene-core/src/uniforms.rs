//! GPU uniform layouts. Field order and names match the WGSL structs in
//! `shaders/lit.wgsl` and `shaders/depth.wgsl`.

use crate::constants::SHADOW_BIAS;
use crate::scene::FrameSnapshot;
use crate::transform::ObjectTransform;
use glam::{Mat3, Vec3};

/// Group 0: per-frame values shared by the shadow and lit pipelines. The
/// shadow pipeline reads `light_space` from this same buffer, so both passes
/// see one upload of one matrix.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_space: [[f32; 4]; 4],
    pub light_dir: [f32; 4],
    pub light_color: [f32; 4],
    pub light_pos: [f32; 4],
    pub point_light_pos: [f32; 4],
    pub point_light_color: [f32; 4],
    // constant, linear, quadratic, unused
    pub point_light_attenuation: [f32; 4],
    pub fog_color: [f32; 4],
    // fog start, fog end, shadow bias, unused
    pub fog_params: [f32; 4],
}

impl FrameUniforms {
    pub const FIELDS: [&'static str; 11] = [
        "view",
        "projection",
        "light_space",
        "light_dir",
        "light_color",
        "light_pos",
        "point_light_pos",
        "point_light_color",
        "point_light_attenuation",
        "fog_color",
        "fog_params",
    ];

    pub fn from_snapshot(frame: &FrameSnapshot) -> Self {
        let point = &frame.point_light;
        Self {
            view: frame.view.to_cols_array_2d(),
            projection: frame.projection.to_cols_array_2d(),
            light_space: frame.light_space.to_cols_array_2d(),
            light_dir: pad3(frame.light.direction, 0.0),
            light_color: pad3(frame.light.color, 1.0),
            light_pos: pad3(frame.light.position(), 1.0),
            point_light_pos: pad3(point.position, 1.0),
            point_light_color: pad3(point.color, 1.0),
            point_light_attenuation: [point.constant, point.linear, point.quadratic, 0.0],
            fog_color: pad3(frame.fog.color, 1.0),
            fog_params: [frame.fog.start, frame.fog.end, SHADOW_BIAS, 0.0],
        }
    }
}

/// Group 1: per-drawable transforms.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    // mat3x3<f32> in a uniform buffer: three 16-byte columns
    pub normal: [[f32; 4]; 3],
}

impl ObjectUniforms {
    pub const FIELDS: [&'static str; 2] = ["model", "normal"];

    pub fn from_transform(t: &ObjectTransform) -> Self {
        Self {
            model: t.model.to_cols_array_2d(),
            normal: pack_mat3(t.normal),
        }
    }
}

#[inline]
fn pad3(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

#[inline]
fn pack_mat3(m: Mat3) -> [[f32; 4]; 3] {
    [pad3(m.x_axis, 0.0), pad3(m.y_axis, 0.0), pad3(m.z_axis, 0.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_wgsl_sizes() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 320);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 112);
    }
}
