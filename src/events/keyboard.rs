use scene_core::{HeldIntents, RenderMode};
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Discrete actions fired on the press edge of a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SetRenderMode(RenderMode),
    RestartAnimation,
    ExtendFog,
    ShrinkFog,
    ToggleMouseCapture,
    Close,
}

#[inline]
pub fn render_mode_for_key(key: KeyCode) -> Option<RenderMode> {
    match key {
        KeyCode::Digit1 => Some(RenderMode::Solid),
        KeyCode::Digit2 => Some(RenderMode::Wireframe),
        KeyCode::Digit3 => Some(RenderMode::Points),
        KeyCode::Digit4 => Some(RenderMode::Smooth),
        _ => None,
    }
}

#[inline]
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    if let Some(mode) = render_mode_for_key(key) {
        return Some(Command::SetRenderMode(mode));
    }
    match key {
        KeyCode::KeyB => Some(Command::RestartAnimation),
        KeyCode::NumpadAdd => Some(Command::ExtendFog),
        KeyCode::NumpadSubtract => Some(Command::ShrinkFog),
        KeyCode::KeyP => Some(Command::ToggleMouseCapture),
        KeyCode::Escape => Some(Command::Close),
        _ => None,
    }
}

/// Keys currently held down. Fed from window events, read once per frame.
#[derive(Debug, Default)]
pub struct KeyTable {
    held: HashSet<KeyCode>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns `true` only on the edge, so auto-repeat does
    /// not re-fire commands.
    pub fn press(&mut self, key: KeyCode) -> bool {
        self.held.insert(key)
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Drop everything, e.g. when the window loses focus and releases would
    /// never arrive.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn held_intents(&self) -> HeldIntents {
        HeldIntents {
            forward: self.is_held(KeyCode::KeyW),
            backward: self.is_held(KeyCode::KeyS),
            left: self.is_held(KeyCode::KeyA),
            right: self.is_held(KeyCode::KeyD),
            up: self.is_held(KeyCode::ArrowUp),
            down: self.is_held(KeyCode::ArrowDown),
            yaw_left: self.is_held(KeyCode::KeyQ),
            yaw_right: self.is_held(KeyCode::KeyE),
            light_back: self.is_held(KeyCode::KeyJ),
            light_forward: self.is_held(KeyCode::KeyL),
        }
    }
}
