use crate::diagnostics;
use crate::events::{command_for_key, Command, KeyTable, MouseLook};
use crate::render::GpuState;
use scene_core::{RenderMode, Scene};
use std::time::Instant;
use winit::event_loop::ControlFlow;
use winit::keyboard::KeyCode;
use winit::window::{CursorGrabMode, Window};

/// The frame tick runs on every loop turn, not only after OS events.
pub const FRAME_CONTROL_FLOW: ControlFlow = ControlFlow::Poll;

/// What the event loop should do after a frame or a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Exit,
}

pub struct FrameContext<'w> {
    pub window: &'w Window,
    pub gpu: GpuState<'w>,
    pub scene: Scene,
    pub keys: KeyTable,
    pub mouse: MouseLook,
    pub last_instant: Instant,
}

impl<'w> FrameContext<'w> {
    pub fn new(window: &'w Window, gpu: GpuState<'w>, scene: Scene) -> Self {
        Self {
            window,
            gpu,
            scene,
            keys: KeyTable::new(),
            mouse: MouseLook::default(),
            last_instant: Instant::now(),
        }
    }

    /// One frame: clock, wheel and timeline, held keys, then both passes.
    pub fn frame(&mut self) -> FrameOutcome {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        self.scene.advance(dt_sec);
        self.scene.apply_held(&self.keys.held_intents());

        let snapshot = self.scene.snapshot(self.gpu.aspect());
        match self.gpu.render(&snapshot) {
            Ok(errors) => {
                diagnostics::log_errors(&errors);
                FrameOutcome::Continue
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated; reconfiguring");
                self.gpu.reconfigure();
                FrameOutcome::Continue
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory; exiting");
                FrameOutcome::Exit
            }
            Err(e) => {
                log::warn!("frame skipped: {e}");
                FrameOutcome::Continue
            }
        }
    }

    pub fn key_pressed(&mut self, key: KeyCode) -> FrameOutcome {
        if !self.keys.press(key) {
            return FrameOutcome::Continue;
        }
        match command_for_key(key) {
            Some(cmd) => self.handle_command(cmd),
            None => FrameOutcome::Continue,
        }
    }

    pub fn key_released(&mut self, key: KeyCode) {
        self.keys.release(key);
    }

    pub fn focus_changed(&mut self, focused: bool) {
        if !focused {
            self.keys.clear();
        }
    }

    pub fn mouse_motion(&mut self, dx: f64, dy: f64) {
        if let Some((yaw, pitch)) = self.mouse.on_motion(dx, dy) {
            self.scene.look_by(yaw, pitch);
        }
    }

    pub fn resized(&mut self, width: u32, height: u32) {
        log::info!("window resized to {width}x{height}");
        self.gpu.resize(width, height);
    }

    pub fn handle_command(&mut self, cmd: Command) -> FrameOutcome {
        match cmd {
            Command::SetRenderMode(mode) => {
                let mode = if self.gpu.supports(mode) {
                    mode
                } else {
                    log::warn!("{} not supported here, using {}", mode.label(), RenderMode::Solid.label());
                    RenderMode::Solid
                };
                self.scene.set_render_mode(mode);
                log::info!("Render mode: {}", mode.label());
            }
            Command::RestartAnimation => {
                self.scene.restart_animation();
                log::info!("Animation restarted");
            }
            Command::ExtendFog => {
                self.scene.fog.extend();
                log::info!("fog end: {:.0}", self.scene.fog.end);
            }
            Command::ShrinkFog => {
                self.scene.fog.shrink();
                log::info!("fog end: {:.0}", self.scene.fog.end);
            }
            Command::ToggleMouseCapture => {
                let captured = !self.mouse.is_captured();
                self.set_mouse_capture(captured);
            }
            Command::Close => return FrameOutcome::Exit,
        }
        FrameOutcome::Continue
    }

    /// Grab and hide the cursor, or release it. A platform that refuses both
    /// grab modes leaves mouse look off.
    pub fn set_mouse_capture(&mut self, captured: bool) {
        if captured {
            let grabbed = self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("cursor grab unavailable: {e}");
                self.mouse.set_captured(false);
                return;
            }
        } else if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("cursor release failed: {e}");
        }
        self.window.set_cursor_visible(!captured);
        self.mouse.set_captured(captured);
        log::info!("mouse capture {}", if captured { "on" } else { "off" });
    }
}
