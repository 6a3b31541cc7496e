use super::helpers;
use super::mesh::{Drawable, Vertex};
use crate::diagnostics::{Checkpoint, ErrorProbe};
use scene_core::shader::{FRAME_GROUP, OBJECT_GROUP};
use scene_core::{FrameUniforms, ObjectUniforms, SetupError, DEPTH_WGSL, SHADOW_MAP_SIZE};

/// Depth-only render of the scene from the orbiting light.
pub(crate) struct ShadowPass {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    pipeline: wgpu::RenderPipeline,
}

impl ShadowPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        frame_bgl: &wgpu::BindGroupLayout,
        object_bgl: &wgpu::BindGroupLayout,
    ) -> Result<Self, SetupError> {
        let probe = ErrorProbe::begin(device, Checkpoint::Setup);
        let (texture, view) = helpers::create_depth_texture(
            device,
            "shadow_map",
            SHADOW_MAP_SIZE,
            SHADOW_MAP_SIZE,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        if let Some(err) = probe.finish().into_iter().next() {
            return Err(SetupError::ShadowTarget(err.to_string()));
        }

        helpers::report_unresolved_uniforms("depth", DEPTH_WGSL, "FrameUniforms", &FrameUniforms::FIELDS);
        helpers::report_unresolved_uniforms("depth", DEPTH_WGSL, "ObjectUniforms", &ObjectUniforms::FIELDS);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("depth_shader"),
            source: wgpu::ShaderSource::Wgsl(DEPTH_WGSL.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_shadow"),
            bind_group_layouts: &[frame_bgl, object_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_depth"),
                buffers: &[Vertex::position_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // Always filled, whatever the lit pass draws with.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                ..Default::default()
            },
            depth_stencil: Some(helpers::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            fragment: None,
            cache: None,
            multiview: None,
        });

        log::info!("shadow map ready: {SHADOW_MAP_SIZE}x{SHADOW_MAP_SIZE}");
        Ok(Self {
            _texture: texture,
            view,
            pipeline,
        })
    }

    pub(crate) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub(crate) fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        frame_bg: &wgpu::BindGroup,
        objects: &[(&wgpu::BindGroup, &Drawable)],
    ) {
        // The pass borrows the shadow target until the end of this block.
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("shadow_pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(FRAME_GROUP, frame_bg, &[]);
        for (object_bg, drawable) in objects {
            pass.set_bind_group(OBJECT_GROUP, *object_bg, &[]);
            drawable.draw(&mut pass);
        }
    }
}
