//! Owned per-frame scene state.
//!
//! `Scene` groups everything the frame loop mutates: camera, look angles,
//! animation playback, wheel angle, lights, fog and render mode. The renderer
//! only ever sees an immutable [`FrameSnapshot`] taken after all mutations of
//! a frame, so the view and light-space matrices it uploads are current.

use crate::animation::{apply, Playback, Timeline};
use crate::camera::{projection_matrix, Camera, LookAngles, MoveDirection};
use crate::constants::{CAMERA_SPEED, KEY_YAW_STEP_DEG, LIGHT_ORBIT_STEP_DEG};
use crate::lighting::{DirectionalLight, Fog, PointLight};
use crate::transform::{SceneTransforms, Wheel};
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Filled polygons, flat shaded.
    #[default]
    Solid,
    Wireframe,
    Points,
    /// Filled polygons, smooth shaded.
    Smooth,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Solid,
        RenderMode::Wireframe,
        RenderMode::Points,
        RenderMode::Smooth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Solid => "Solid",
            RenderMode::Wireframe => "Wireframe",
            RenderMode::Points => "Polygonal",
            RenderMode::Smooth => "Smooth",
        }
    }
}

/// Keys currently held, sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldIntents {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub light_back: bool,
    pub light_forward: bool,
}

pub struct Scene {
    pub camera: Camera,
    pub look: LookAngles,
    pub timeline: Timeline,
    pub playback: Playback,
    pub wheel: Wheel,
    pub light: DirectionalLight,
    pub point_light: PointLight,
    pub fog: Fog,
    pub render_mode: RenderMode,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Timeline::opening_cinematic())
    }
}

impl Scene {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            camera: Camera::initial(),
            look: LookAngles::default(),
            timeline,
            playback: Playback::default(),
            wheel: Wheel::default(),
            light: DirectionalLight::default(),
            point_light: PointLight::default(),
            fog: Fog::default(),
            render_mode: RenderMode::default(),
        }
    }

    /// Wheel rotation then one timeline step. Returns the index of the phase
    /// applied this frame, if any.
    pub fn advance(&mut self, dt_sec: f32) -> Option<usize> {
        self.wheel.advance(dt_sec);
        let sampled_at = self.playback.elapsed();
        let kind = self.playback.tick(&self.timeline, dt_sec as f64).copied()?;
        apply(&kind, &mut self.camera, &mut self.look);
        self.timeline.phase_index_at(sampled_at)
    }

    /// Held-key movement, applied after the timeline so input wins ties.
    pub fn apply_held(&mut self, held: &HeldIntents) {
        let moves = [
            (held.forward, MoveDirection::Forward),
            (held.backward, MoveDirection::Backward),
            (held.left, MoveDirection::Left),
            (held.right, MoveDirection::Right),
            (held.up, MoveDirection::Up),
            (held.down, MoveDirection::Down),
        ];
        for (_, dir) in moves.iter().filter(|(on, _)| *on) {
            self.camera.move_in(*dir, CAMERA_SPEED);
        }
        if held.yaw_left {
            self.look.yaw -= KEY_YAW_STEP_DEG;
            self.look.apply_to(&mut self.camera);
        }
        if held.yaw_right {
            self.look.yaw += KEY_YAW_STEP_DEG;
            self.look.apply_to(&mut self.camera);
        }
        if held.light_back {
            self.light.orbit_by(-LIGHT_ORBIT_STEP_DEG);
        }
        if held.light_forward {
            self.light.orbit_by(LIGHT_ORBIT_STEP_DEG);
        }
    }

    /// Mouse-look delta in degrees; pitch is clamped before the camera sees it.
    pub fn look_by(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.look.add(yaw_delta, pitch_delta);
        self.look.apply_to(&mut self.camera);
    }

    /// Back to the start of the intro: clock at zero, canonical camera pose,
    /// initial look angles.
    pub fn restart_animation(&mut self) {
        self.playback.restart();
        self.camera = Camera::canonical();
        self.look = LookAngles::default();
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn snapshot(&self, aspect: f32) -> FrameSnapshot {
        let view = self.camera.view_matrix();
        FrameSnapshot {
            view,
            projection: projection_matrix(aspect),
            light_space: self.light.light_space_matrix(),
            camera_position: self.camera.position(),
            transforms: SceneTransforms::compute(view, &self.wheel),
            light: self.light.clone(),
            point_light: self.point_light.clone(),
            fog: self.fog.clone(),
            render_mode: self.render_mode,
        }
    }
}

/// Everything both render passes need for one frame, derived once.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub view: Mat4,
    pub projection: Mat4,
    pub light_space: Mat4,
    pub camera_position: Vec3,
    pub transforms: SceneTransforms,
    pub light: DirectionalLight,
    pub point_light: PointLight,
    pub fog: Fog,
    pub render_mode: RenderMode,
}
