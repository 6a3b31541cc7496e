// Host-side tests for the scripted intro timeline and its playback clock.

use glam::Vec3;
use scene_core::{
    wrap_degrees, AnimationPhase, Camera, HeldIntents, LookAngles, PhaseKind, Playback,
    PlaybackState, Scene, Timeline, CAMERA_SPEED, WHEEL_SPEED_DEG_PER_SEC,
};

#[test]
fn opening_cinematic_coverage() {
    let t = Timeline::opening_cinematic();
    let cases = [
        (0.0, Some(0)),
        (3.999, Some(0)),
        (4.0, Some(1)),
        (21.999, Some(1)),
        (22.0, Some(2)),
        (26.999, Some(2)),
        (27.0, Some(3)),
        (31.999, Some(3)),
        (32.0, None),
    ];
    for (elapsed, expected) in cases {
        assert_eq!(t.phase_index_at(elapsed), expected, "at {elapsed}s");
    }
    assert_eq!(t.total_duration(), 32.0);
}

#[test]
fn overlapping_phases_first_match_wins() {
    let t = Timeline::from_phases(vec![
        AnimationPhase {
            start: 0.0,
            duration: 10.0,
            kind: PhaseKind::MoveForward { speed: 1.0 },
        },
        AnimationPhase {
            start: 5.0,
            duration: 10.0,
            kind: PhaseKind::MoveUp { speed: 1.0 },
        },
    ]);
    assert_eq!(t.phase_index_at(7.0), Some(0));
    assert_eq!(t.phase_index_at(12.0), Some(1));
}

#[test]
fn playback_stops_at_total_duration() {
    let t = Timeline::opening_cinematic();
    let mut playback = Playback::default();
    let mut frames = 0;
    while playback.is_playing() {
        playback.tick(&t, 0.5);
        frames += 1;
        assert!(frames < 1000, "playback never stopped");
    }
    assert_eq!(playback.state(), PlaybackState::Stopped);
    assert!(playback.elapsed() >= 32.0);
    assert!(playback.tick(&t, 0.5).is_none());
}

#[test]
fn tick_samples_before_advancing() {
    let t = Timeline::opening_cinematic();
    let mut playback = Playback::default();
    // First frame runs phase 0 even with a dt that crosses into phase 1.
    let kind = playback.tick(&t, 5.0).copied();
    assert_eq!(kind, Some(PhaseKind::MoveForward { speed: 0.7 }));
    assert!(matches!(playback.tick(&t, 0.1), Some(PhaseKind::Rotate { .. })));
}

#[test]
fn rotate_phase_steps_yaw_through_look_angles() {
    let mut cam = Camera::initial();
    let mut look = LookAngles::default();
    scene_core::apply(&PhaseKind::Rotate { yaw_step: 0.7 }, &mut cam, &mut look);
    assert!((look.yaw - (-89.3)).abs() < 1e-5);
    assert_eq!(cam.yaw(), look.yaw);
}

#[test]
fn snap_pose_faces_target() {
    let mut cam = Camera::initial();
    let mut look = LookAngles::default();
    let position = Vec3::new(10.0, 0.0, 0.0);
    scene_core::apply(
        &PhaseKind::SnapPose {
            position,
            target: Vec3::ZERO,
        },
        &mut cam,
        &mut look,
    );
    assert_eq!(cam.position(), position);
    assert!((cam.front() - Vec3::NEG_X).length() < 1e-5);
}

#[test]
fn restart_is_idempotent_from_any_time() {
    for run_for in [0.0_f32, 2.5, 17.3, 29.0, 45.0] {
        let mut scene = Scene::default();
        let mut t = 0.0;
        while t < run_for {
            scene.advance(0.25);
            t += 0.25;
        }
        scene.restart_animation();
        let once = (scene.camera.clone(), scene.look, scene.playback.elapsed());
        scene.restart_animation();
        let twice = (scene.camera.clone(), scene.look, scene.playback.elapsed());

        assert_eq!(once, twice, "after {run_for}s");
        assert_eq!(scene.camera, Camera::canonical());
        assert_eq!(scene.look, LookAngles::default());
        assert_eq!(scene.playback.elapsed(), 0.0);
        assert!(scene.playback.is_playing());
    }
}

#[test]
fn first_frame_glides_forward() {
    let mut scene = Scene::default();
    let start = scene.camera.position();
    let front = scene.camera.front();
    assert_eq!(scene.advance(1.0 / 60.0), Some(0));
    assert!((scene.camera.position() - (start + front * 0.7)).length() < 1e-4);
}

#[test]
fn held_input_wins_over_the_snap_phase() {
    let mut scene = Scene::default();
    while scene.playback.elapsed() < 27.0 {
        scene.advance(0.25);
    }
    assert_eq!(scene.advance(0.25), Some(3));
    scene.apply_held(&HeldIntents {
        forward: true,
        ..Default::default()
    });

    let canonical = Camera::canonical();
    let expected = canonical.position() + canonical.front() * CAMERA_SPEED;
    assert!((scene.camera.position() - expected).length() < 1e-4);
}

#[test]
fn wheel_keeps_turning_after_playback_stops() {
    let mut scene = Scene::default();
    while scene.playback.is_playing() {
        scene.advance(0.25);
    }
    let before = scene.wheel.angle();
    assert_eq!(scene.advance(1.0), None);
    let expected = wrap_degrees(before + WHEEL_SPEED_DEG_PER_SEC);
    assert!((scene.wheel.angle() - expected).abs() < 1e-3);
}
