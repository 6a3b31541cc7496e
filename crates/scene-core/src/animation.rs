//! Scripted camera timeline for the opening fly-through.
//!
//! Phases are plain data ([`PhaseKind`]) dispatched by [`apply`]. Lookup is a
//! linear scan where the first phase whose `[start, start + duration)` window
//! contains the elapsed time wins. Phases built with [`Timeline::push`] never
//! overlap; a hand-built table that does overlap keeps first-match-wins.

use crate::camera::{Camera, LookAngles, MoveDirection};
use crate::constants::{
    vec3, CAMERA_LOOK_TARGET, CANONICAL_CAMERA_POSITION, INTRO_FORWARD_SECS, INTRO_FORWARD_SPEED,
    INTRO_ORBIT_SECS, INTRO_RISE_SECS, INTRO_RISE_SPEED, INTRO_SNAP_SECS, INTRO_YAW_STEP_DEG,
};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhaseKind {
    MoveForward { speed: f32 },
    Rotate { yaw_step: f32 },
    MoveUp { speed: f32 },
    SnapPose { position: Vec3, target: Vec3 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationPhase {
    pub start: f64,
    pub duration: f64,
    pub kind: PhaseKind,
}

impl AnimationPhase {
    #[inline]
    pub fn contains(&self, elapsed: f64) -> bool {
        elapsed >= self.start && elapsed < self.start + self.duration
    }
}

/// Apply one frame of a phase to the camera.
pub fn apply(kind: &PhaseKind, camera: &mut Camera, look: &mut LookAngles) {
    match *kind {
        PhaseKind::MoveForward { speed } => camera.move_in(MoveDirection::Forward, speed),
        PhaseKind::Rotate { yaw_step } => {
            look.yaw += yaw_step;
            look.apply_to(camera);
        }
        PhaseKind::MoveUp { speed } => camera.move_in(MoveDirection::Up, speed),
        PhaseKind::SnapPose { position, target } => {
            *camera = Camera::looking_at(position, target);
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    phases: Vec<AnimationPhase>,
    total: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a phase starting where the previous one ended.
    pub fn push(&mut self, duration: f64, kind: PhaseKind) -> &mut Self {
        self.phases.push(AnimationPhase {
            start: self.total,
            duration,
            kind,
        });
        self.total += duration;
        self
    }

    /// Build from explicit phases. Start times must be non-decreasing; the
    /// total is the sum of durations as with [`Timeline::push`].
    pub fn from_phases(phases: Vec<AnimationPhase>) -> Self {
        debug_assert!(phases.windows(2).all(|w| w[0].start <= w[1].start));
        let total = phases.iter().map(|p| p.duration).sum();
        Self { phases, total }
    }

    /// Forward glide, yaw sweep, rise, then snap back to the canonical pose.
    pub fn opening_cinematic() -> Self {
        let mut timeline = Self::new();
        timeline
            .push(
                INTRO_FORWARD_SECS,
                PhaseKind::MoveForward {
                    speed: INTRO_FORWARD_SPEED,
                },
            )
            .push(
                INTRO_ORBIT_SECS,
                PhaseKind::Rotate {
                    yaw_step: INTRO_YAW_STEP_DEG,
                },
            )
            .push(
                INTRO_RISE_SECS,
                PhaseKind::MoveUp {
                    speed: INTRO_RISE_SPEED,
                },
            )
            .push(
                INTRO_SNAP_SECS,
                PhaseKind::SnapPose {
                    position: vec3(CANONICAL_CAMERA_POSITION),
                    target: vec3(CAMERA_LOOK_TARGET),
                },
            );
        timeline
    }

    pub fn phases(&self) -> &[AnimationPhase] {
        &self.phases
    }

    pub fn total_duration(&self) -> f64 {
        self.total
    }

    /// Index of the active phase at `elapsed`, first match wins.
    pub fn phase_index_at(&self, elapsed: f64) -> Option<usize> {
        self.phases.iter().position(|p| p.contains(elapsed))
    }

    pub fn phase_at(&self, elapsed: f64) -> Option<&AnimationPhase> {
        self.phase_index_at(elapsed).map(|i| &self.phases[i])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Stopped,
}

/// Resettable playback clock for a [`Timeline`].
#[derive(Clone, Debug)]
pub struct Playback {
    state: PlaybackState,
    elapsed: f64,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            state: PlaybackState::Playing,
            elapsed: 0.0,
        }
    }
}

impl Playback {
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Sample the timeline at the current elapsed time, then advance the clock
    /// by `dt`. Returns the phase to run this frame, or `None` when stopped,
    /// finished, or between phases. Reaching the total duration stops
    /// playback without running a phase.
    pub fn tick<'t>(&mut self, timeline: &'t Timeline, dt: f64) -> Option<&'t PhaseKind> {
        if self.state == PlaybackState::Stopped {
            return None;
        }
        let now = self.elapsed;
        self.elapsed += dt;
        if now >= timeline.total_duration() {
            self.state = PlaybackState::Stopped;
            log::info!("animation finished after {:.2}s", now);
            return None;
        }
        timeline.phase_at(now).map(|p| &p.kind)
    }

    pub fn restart(&mut self) {
        self.state = PlaybackState::Playing;
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_chains_start_times() {
        let t = Timeline::opening_cinematic();
        let starts: Vec<f64> = t.phases().iter().map(|p| p.start).collect();
        assert_eq!(starts, vec![0.0, 4.0, 22.0, 27.0]);
        assert_eq!(t.total_duration(), 32.0);
    }
}
