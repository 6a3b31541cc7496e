use std::collections::HashMap;

use super::helpers;
use super::mesh::{Drawable, Vertex};
use scene_core::shader::{
    FRAME_GROUP, OBJECT_GROUP, SHADOW_GROUP, SHADOW_MAP_BINDING, SHADOW_SAMPLER_BINDING,
};
use scene_core::{FrameUniforms, ObjectUniforms, RenderMode, LIT_WGSL};

/// Device features a mode needs beyond the defaults.
pub(crate) fn required_features(mode: RenderMode) -> wgpu::Features {
    match mode {
        RenderMode::Wireframe => wgpu::Features::POLYGON_MODE_LINE,
        RenderMode::Points => wgpu::Features::POLYGON_MODE_POINT,
        RenderMode::Solid | RenderMode::Smooth => wgpu::Features::empty(),
    }
}

fn polygon_mode(mode: RenderMode) -> wgpu::PolygonMode {
    match mode {
        RenderMode::Wireframe => wgpu::PolygonMode::Line,
        RenderMode::Points => wgpu::PolygonMode::Point,
        RenderMode::Solid | RenderMode::Smooth => wgpu::PolygonMode::Fill,
    }
}

fn fragment_entry(mode: RenderMode) -> &'static str {
    match mode {
        RenderMode::Solid => "fs_flat",
        _ => "fs_smooth",
    }
}

/// Forward pass to the surface: lights, shadow lookup and fog.
pub(crate) struct LitPass {
    shadow_bg: wgpu::BindGroup,
    solid: wgpu::RenderPipeline,
    others: HashMap<RenderMode, wgpu::RenderPipeline>,
}

impl LitPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        frame_bgl: &wgpu::BindGroupLayout,
        object_bgl: &wgpu::BindGroupLayout,
        shadow_view: &wgpu::TextureView,
    ) -> Self {
        let shadow_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: SHADOW_MAP_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Depth,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: SHADOW_SAMPLER_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        let shadow_bg = shadow_bind_group(device, &shadow_bgl, shadow_view, &shadow_sampler);

        helpers::report_unresolved_uniforms("lit", LIT_WGSL, "FrameUniforms", &FrameUniforms::FIELDS);
        helpers::report_unresolved_uniforms("lit", LIT_WGSL, "ObjectUniforms", &ObjectUniforms::FIELDS);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lit_shader"),
            source: wgpu::ShaderSource::Wgsl(LIT_WGSL.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_lit"),
            bind_group_layouts: &[frame_bgl, object_bgl, &shadow_bgl],
            push_constant_ranges: &[],
        });

        let features = device.features();
        let make = |mode| make_lit_pipeline(device, &layout, &shader, surface_format, mode);
        let solid = make(RenderMode::Solid);
        let mut others = HashMap::new();
        for mode in RenderMode::ALL.into_iter().filter(|m| *m != RenderMode::Solid) {
            if features.contains(required_features(mode)) {
                others.insert(mode, make(mode));
            } else {
                log::warn!(
                    "render mode {} unavailable on this adapter; it will draw as {}",
                    mode.label(),
                    RenderMode::Solid.label()
                );
            }
        }

        Self {
            shadow_bg,
            solid,
            others,
        }
    }

    pub(crate) fn supports(&self, mode: RenderMode) -> bool {
        mode == RenderMode::Solid || self.others.contains_key(&mode)
    }

    pub(crate) fn pipeline_for(&self, mode: RenderMode) -> &wgpu::RenderPipeline {
        self.others.get(&mode).unwrap_or(&self.solid)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        clear: wgpu::Color,
        frame_bg: &wgpu::BindGroup,
        objects: &[(&wgpu::BindGroup, &Drawable)],
        mode: RenderMode,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lit_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(self.pipeline_for(mode));
        pass.set_bind_group(FRAME_GROUP, frame_bg, &[]);
        pass.set_bind_group(SHADOW_GROUP, &self.shadow_bg, &[]);
        for (object_bg, drawable) in objects {
            pass.set_bind_group(OBJECT_GROUP, *object_bg, &[]);
            drawable.draw(&mut pass);
        }
    }
}

fn shadow_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("shadow_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: SHADOW_MAP_BINDING,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: SHADOW_SAMPLER_BINDING,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

fn make_lit_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    mode: RenderMode,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("lit_pipeline_{}", mode.label())),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: polygon_mode(mode),
            ..Default::default()
        },
        depth_stencil: Some(helpers::depth_stencil_state()),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fragment_entry(mode)),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
