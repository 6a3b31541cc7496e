use crate::constants::{SCENE_MODEL_PATH, WHEEL_MODEL_PATH};
use crate::diagnostics::{BackendError, Checkpoint, ErrorProbe};
use scene_core::{FrameSnapshot, FrameUniforms, ObjectUniforms, RenderMode, SetupError};
use winit::window::Window;

mod helpers;
mod lit;
pub mod mesh;
mod shadow;

use lit::LitPass;
use mesh::Drawable;
use shadow::ShadowPass;

/// Uniform buffer plus bind group for one drawable's transforms.
struct ObjectBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ObjectBinding {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = uniform_buffer::<ObjectUniforms>(device, &format!("{label}_uniforms"));
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label}_bg")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }
}

fn uniform_buffer<T>(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<T>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub struct GpuState<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    // Group 0, read by both passes.
    frame_buffer: wgpu::Buffer,
    frame_bg: wgpu::BindGroup,
    scene_root: ObjectBinding,
    wheel: ObjectBinding,

    scene_model: Drawable,
    wheel_model: Drawable,

    shadow: ShadowPass,
    lit: LitPass,
    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
}

impl<'w> GpuState<'w> {
    pub fn new(window: &'w Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(|e| SetupError::Surface(e.to_string()))?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(SetupError::NoAdapter)?;
        let info = adapter.get_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);

        // Wireframe and point modes only where the adapter can rasterize them.
        let optional = RenderMode::ALL
            .into_iter()
            .fold(wgpu::Features::empty(), |acc, m| acc | lit::required_features(m));
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("valhalla_device"),
                required_features: adapter.features() & optional,
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        ))
        .map_err(|e| SetupError::Device(e.to_string()))?;
        device.on_uncaptured_error(Box::new(|err| {
            log::error!("uncaptured backend error: {err}");
        }));

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| SetupError::Surface("surface reports no formats".to_string()))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene_data = mesh::load_model(SCENE_MODEL_PATH)?;
        let wheel_data = mesh::load_model(WHEEL_MODEL_PATH)?;

        let probe = ErrorProbe::begin(&device, Checkpoint::Setup);
        let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[helpers::uniform_layout_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let frame_buffer = uniform_buffer::<FrameUniforms>(&device, "frame_uniforms");
        let frame_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });
        let scene_root = ObjectBinding::new(&device, &object_bgl, "scene_root");
        let wheel = ObjectBinding::new(&device, &object_bgl, "wheel");

        let scene_model = Drawable::upload(&device, "scene", &scene_data);
        let wheel_model = Drawable::upload(&device, "wheel", &wheel_data);

        let shadow = ShadowPass::new(&device, &frame_bgl, &object_bgl)?;
        let lit = LitPass::new(&device, format, &frame_bgl, &object_bgl, shadow.view());
        let (depth_tex, depth_view) = helpers::create_depth_texture(
            &device,
            "scene_depth",
            width,
            height,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        crate::diagnostics::log_errors(&probe.finish());

        log::info!("surface {width}x{height}, format {format:?}");
        Ok(Self {
            surface,
            device,
            queue,
            config,
            frame_buffer,
            frame_bg,
            scene_root,
            wheel,
            scene_model,
            wheel_model,
            shadow,
            lit,
            _depth_tex: depth_tex,
            depth_view,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn supports(&self, mode: RenderMode) -> bool {
        self.lit.supports(mode)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if (width, height) == self.size() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    /// Reapply the surface configuration and rebuild size-dependent targets.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        let (tex, view) = helpers::create_depth_texture(
            &self.device,
            "scene_depth",
            self.config.width,
            self.config.height,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        self._depth_tex = tex;
        self.depth_view = view;
    }

    /// Upload the frame, record the shadow pass then the lit pass into one
    /// encoder, submit once and present. Backend errors caught on the way
    /// are returned for the caller to log.
    pub fn render(&mut self, frame: &FrameSnapshot) -> Result<Vec<BackendError>, wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        let mut errors = Vec::new();

        let probe = ErrorProbe::begin(&self.device, Checkpoint::ShadowPass);
        self.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::from_snapshot(frame)),
        );
        self.queue.write_buffer(
            &self.scene_root.buffer,
            0,
            bytemuck::bytes_of(&ObjectUniforms::from_transform(&frame.transforms.scene_root)),
        );
        self.queue.write_buffer(
            &self.wheel.buffer,
            0,
            bytemuck::bytes_of(&ObjectUniforms::from_transform(&frame.transforms.wheel)),
        );
        let objects = [
            (&self.scene_root.bind_group, &self.scene_model),
            (&self.wheel.bind_group, &self.wheel_model),
        ];
        self.shadow.record(&mut encoder, &self.frame_bg, &objects);
        errors.extend(probe.finish());

        let probe = ErrorProbe::begin(&self.device, Checkpoint::LitPass);
        let fog = frame.fog.color;
        let clear = wgpu::Color {
            r: fog.x as f64,
            g: fog.y as f64,
            b: fog.z as f64,
            a: 1.0,
        };
        self.lit.record(
            &mut encoder,
            &target,
            &self.depth_view,
            clear,
            &self.frame_bg,
            &objects,
            frame.render_mode,
        );
        self.queue.submit(Some(encoder.finish()));
        errors.extend(probe.finish());

        output.present();
        Ok(errors)
    }
}
