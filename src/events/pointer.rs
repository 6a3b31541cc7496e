use crate::constants::MOUSE_SENSITIVITY;

/// Relative-motion look state.
///
/// While captured, each raw mouse delta yields a `(yaw, pitch)` delta in
/// degrees. The first delta after (re)capture is dropped, since some
/// platforms report the warp into the grabbed window as motion.
#[derive(Clone, Copy, Debug)]
pub struct MouseLook {
    pub sensitivity: f32,
    captured: bool,
    primed: bool,
}

impl Default for MouseLook {
    fn default() -> Self {
        Self::new(MOUSE_SENSITIVITY)
    }
}

impl MouseLook {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            captured: false,
            primed: false,
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
        self.primed = false;
    }

    /// Returns `(yaw_delta, pitch_delta)`; y is inverted since device y grows
    /// downwards.
    pub fn on_motion(&mut self, dx: f64, dy: f64) -> Option<(f32, f32)> {
        if !self.captured {
            return None;
        }
        if !self.primed {
            self.primed = true;
            return None;
        }
        Some((dx as f32 * self.sensitivity, -(dy as f32) * self.sensitivity))
    }
}
