use scene_core::Scene;
use valhalla::constants::{START_WITH_MOUSE_CAPTURED, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use valhalla::frame::FRAME_CONTROL_FLOW;
use valhalla::{FrameContext, FrameOutcome, GpuState};
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::WindowBuilder;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let event_loop = EventLoop::new().map_err(|e| scene_core::SetupError::Window(e.to_string()))?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .build(&event_loop)
        .map_err(|e| scene_core::SetupError::Window(e.to_string()))?;

    let gpu = GpuState::new(&window)?;
    let scene = Scene::default();
    log::info!(
        "opening animation: {} phases, {:.1}s total",
        scene.timeline.phases().len(),
        scene.timeline.total_duration()
    );
    let mut ctx = FrameContext::new(&window, gpu, scene);
    ctx.set_mouse_capture(START_WITH_MOUSE_CAPTURED);
    event_loop.set_control_flow(FRAME_CONTROL_FLOW);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => ctx.resized(size.width, size.height),
            WindowEvent::Focused(focused) => ctx.focus_changed(focused),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if ctx.key_pressed(code) == FrameOutcome::Exit {
                        elwt.exit();
                    }
                }
                ElementState::Released => ctx.key_released(code),
            },
            _ => {}
        },
        Event::DeviceEvent {
            event: DeviceEvent::MouseMotion { delta },
            ..
        } => ctx.mouse_motion(delta.0, delta.1),
        Event::AboutToWait => match ctx.frame() {
            FrameOutcome::Exit => elwt.exit(),
            FrameOutcome::Continue => ctx.window.request_redraw(),
        },
        _ => {}
    })?;
    Ok(())
}
