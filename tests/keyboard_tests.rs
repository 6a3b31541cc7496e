// Host-side tests for key mapping and the held-key table.

use scene_core::{HeldIntents, RenderMode};
use valhalla::events::keyboard::render_mode_for_key;
use valhalla::events::{command_for_key, Command, KeyTable};
use winit::keyboard::KeyCode;

#[test]
fn digit_keys_select_render_modes() {
    assert_eq!(render_mode_for_key(KeyCode::Digit1), Some(RenderMode::Solid));
    assert_eq!(render_mode_for_key(KeyCode::Digit2), Some(RenderMode::Wireframe));
    assert_eq!(render_mode_for_key(KeyCode::Digit3), Some(RenderMode::Points));
    assert_eq!(render_mode_for_key(KeyCode::Digit4), Some(RenderMode::Smooth));
    assert_eq!(render_mode_for_key(KeyCode::Digit5), None);
}

#[test]
fn discrete_commands() {
    assert_eq!(command_for_key(KeyCode::KeyB), Some(Command::RestartAnimation));
    assert_eq!(command_for_key(KeyCode::NumpadAdd), Some(Command::ExtendFog));
    assert_eq!(command_for_key(KeyCode::NumpadSubtract), Some(Command::ShrinkFog));
    assert_eq!(command_for_key(KeyCode::KeyP), Some(Command::ToggleMouseCapture));
    assert_eq!(command_for_key(KeyCode::Escape), Some(Command::Close));
    assert_eq!(
        command_for_key(KeyCode::Digit3),
        Some(Command::SetRenderMode(RenderMode::Points))
    );
    // Held movement keys are not commands.
    for key in [KeyCode::KeyW, KeyCode::KeyQ, KeyCode::KeyJ, KeyCode::ArrowUp] {
        assert_eq!(command_for_key(key), None);
    }
}

#[test]
fn press_reports_only_the_edge() {
    let mut keys = KeyTable::new();
    assert!(keys.press(KeyCode::KeyB));
    assert!(!keys.press(KeyCode::KeyB), "auto-repeat must not re-fire");
    keys.release(KeyCode::KeyB);
    assert!(keys.press(KeyCode::KeyB));
}

#[test]
fn held_keys_become_intents() {
    let mut keys = KeyTable::new();
    assert_eq!(keys.held_intents(), HeldIntents::default());

    for key in [KeyCode::KeyW, KeyCode::KeyD, KeyCode::ArrowDown, KeyCode::KeyE, KeyCode::KeyJ] {
        keys.press(key);
    }
    let held = keys.held_intents();
    assert!(held.forward && held.right && held.down && held.yaw_right && held.light_back);
    assert!(!held.backward && !held.left && !held.up && !held.yaw_left && !held.light_forward);

    keys.clear();
    assert_eq!(keys.held_intents(), HeldIntents::default());
}

#[test]
fn held_intents_drive_the_scene() {
    let mut scene = scene_core::Scene::default();
    let start = scene.camera.position();
    let front = scene.camera.front();
    scene.apply_held(&HeldIntents {
        forward: true,
        light_forward: true,
        ..HeldIntents::default()
    });
    assert!((scene.camera.position() - (start + front)).length() < 1e-4);
    assert_eq!(scene.light.orbit_angle(), 1.0);

    scene.apply_held(&HeldIntents {
        yaw_left: true,
        ..HeldIntents::default()
    });
    assert_eq!(scene.look.yaw, -91.0);
    assert_eq!(scene.camera.yaw(), -91.0);
}
