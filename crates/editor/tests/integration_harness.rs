//! Integration tests driving the headless harness end to end.
//!
//! Pointer events are produced by projecting world points through the room
//! camera, the way a host viewport would deliver them.

use std::f64::consts::PI;

use roomboard_editor_lib::harness::TestHarness;
use roomboard_editor_lib::state::NodeTransform;
use roomboard_editor_lib::viewport::furniture_controller::DragMode;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ── Furniture dragging ──────────────────────────────────────────

#[test]
fn test_corner_clamp_in_default_room() {
    let mut h = TestHarness::new();
    h.add_box("a", 0.0, 0.0);

    assert!(h.drag_furniture_to("a", 10.0, 10.0));
    let [x, y, z] = h.position_of("a").unwrap();
    assert!(approx(x, 2.3), "x = {x}");
    assert!(approx(z, 3.3), "z = {z}");
    assert_eq!(y, 0.0);

    assert!(h.drag_furniture_to("a", -10.0, -10.0));
    let [x, _, z] = h.position_of("a").unwrap();
    assert!(approx(x, -2.3) && approx(z, -3.3), "({x}, {z})");
}

#[test]
fn test_anchor_offset_is_preserved() {
    let mut h = TestHarness::new();
    h.add_box("a", 1.0, 1.0);

    let down = h.screen_of_instance("a").unwrap();
    let hit0 = h.floor_under(down).unwrap();
    assert_eq!(h.press_at(down, false).as_deref(), Some("a"));

    let target = h.screen_of_floor(0.5, -0.5).unwrap();
    let hit1 = h.floor_under(target).unwrap();
    assert!(h.move_to(target, false));

    let [x, _, z] = h.position_of("a").unwrap();
    assert!(approx(x, hit1.x + (1.0 - hit0.x)), "x = {x}");
    assert!(approx(z, hit1.z + (1.0 - hit0.z)), "z = {z}");
    h.release();
}

#[test]
fn test_shift_drag_rotates_by_ndc_delta() {
    let mut h = TestHarness::new();
    h.add_box("a", 0.0, 0.0);
    let before = h.room().history_len();

    assert!(h.rotate_furniture("a", 0.5));
    let f = h.furniture("a").unwrap();
    assert!(approx(f.yaw(), 0.5 * PI), "yaw = {}", f.yaw());
    assert_eq!(f.position(), [0.0, 0.0, 0.0]);
    assert_eq!(h.room().history_len(), before + 1);
}

#[test]
fn test_click_without_move_does_not_commit() {
    let mut h = TestHarness::new();
    h.add_box("a", 0.0, 0.0);
    h.room_mut().clear_selection();
    let before = h.room().history_len();

    assert_eq!(h.press_on("a", false).as_deref(), Some("a"));
    assert!(h.release());
    assert!(h.room().is_selected("a"));
    assert_eq!(h.room().history_len(), before);
}

#[test]
fn test_miss_clears_selection() {
    let mut h = TestHarness::new();
    h.add_box("a", 0.0, 0.0);
    assert!(h.room().is_selected("a"));

    assert!(h.press_at(egui::pos2(2.0, 2.0), false).is_none());
    assert!(h.room().selected().is_none());
    h.release();
}

#[test]
fn test_room_shrink_reclamps_on_next_drag() {
    let mut h = TestHarness::new();
    h.add_box("a", 2.0, 3.0);
    assert!(h.room_mut().set_room(3.0, 3.0, 3.0));
    // Not touched until dragged again
    assert_eq!(h.position_of("a").unwrap(), [2.0, 0.0, 3.0]);

    assert!(h.drag_furniture_to("a", 2.0, 3.0));
    let [x, _, z] = h.position_of("a").unwrap();
    assert!(x <= 0.8 + 1e-9 && z <= 0.8 + 1e-9, "({x}, {z})");
}

// ── Camera arbitration ──────────────────────────────────────────

#[test]
fn test_camera_disabled_during_drag_and_restored() {
    let mut h = TestHarness::new();
    h.add_box("a", 0.0, 0.0);
    assert!(h.camera_enabled());

    h.press_on("a", false);
    assert!(!h.camera_enabled());
    h.move_to_floor(1.0, 1.0);
    assert!(!h.camera_enabled());

    h.release();
    assert!(h.camera_enabled());
}

#[test]
fn test_fallback_release_restores_camera() {
    let mut h = TestHarness::new();
    h.add_box("a", 0.0, 0.0);
    let before = h.room().history_len();

    h.press_on("a", false);
    h.move_to_floor(1.0, 0.0);
    assert!(!h.camera_enabled());

    // Pointer released outside the viewport
    let recovered = h.release_outside();
    assert_eq!(recovered, vec!["a".to_string()]);
    assert!(h.camera_enabled());
    assert_eq!(h.viewport.controller("a").unwrap().mode(), DragMode::Idle);
    assert_eq!(h.room().history_len(), before + 1);

    // Later moves no longer drag
    let pos = h.position_of("a").unwrap();
    h.move_to_floor(-2.0, -2.0);
    assert_eq!(h.position_of("a").unwrap(), pos);
}

#[test]
fn test_camera_preference_survives_drag_end() {
    let mut h = TestHarness::new();
    h.add_box("a", 0.0, 0.0);
    h.viewport.controls_mut().set_preference(false);

    h.press_on("a", false);
    h.release();
    assert!(!h.camera_enabled());

    h.viewport.controls_mut().set_preference(true);
    assert!(h.camera_enabled());
}

#[test]
fn test_background_drag_orbits_only_when_enabled() {
    let mut h = TestHarness::new();
    let az = h.viewport.camera().azimuth;

    h.press_at(egui::pos2(5.0, 5.0), false);
    h.move_to(egui::pos2(105.0, 5.0), false);
    h.release();
    for _ in 0..60 {
        h.viewport.update();
    }
    assert!((h.viewport.camera().azimuth - az).abs() > 1e-3);
}

// ── Selection coupling ──────────────────────────────────────────

#[test]
fn test_selecting_b_mid_drag_never_moves_a() {
    let mut h = TestHarness::new();
    h.add_box("a", -1.5, 1.5);
    h.add_box("b", 1.5, -1.5);

    assert_eq!(h.press_on("a", false).as_deref(), Some("a"));
    // No pointer-up before pressing on B
    assert_eq!(h.press_on("b", false).as_deref(), Some("b"));
    assert!(h.room().is_selected("b"));
    assert_eq!(h.viewport.controller("a").unwrap().mode(), DragMode::Idle);

    h.move_to_floor(0.0, 0.0);
    assert_eq!(h.position_of("a").unwrap(), [-1.5, 0.0, 1.5]);
    assert_ne!(h.position_of("b").unwrap(), [1.5, 0.0, -1.5]);

    h.release();
    assert!(h.camera_enabled());
}

#[test]
fn test_delete_mid_drag_releases_camera() {
    let mut h = TestHarness::new();
    h.add_box("a", 0.0, 0.0);
    h.press_on("a", false);
    assert!(h.delete_furniture("a"));
    assert!(h.camera_enabled());
    assert!(h.room().selected().is_none());
}

// ── History ─────────────────────────────────────────────────────

#[test]
fn test_drag_undo_restores_position() {
    let mut h = TestHarness::new();
    h.add_box("a", 0.0, 0.0);
    h.drag_furniture_to("a", 1.0, 1.0);
    assert_ne!(h.position_of("a").unwrap(), [0.0, 0.0, 0.0]);

    assert!(h.undo());
    assert_eq!(h.position_of("a").unwrap(), [0.0, 0.0, 0.0]);
    assert!(h.redo());
    assert_ne!(h.position_of("a").unwrap(), [0.0, 0.0, 0.0]);
}

#[test]
fn test_floor_plan_import_replaces_furniture() {
    let mut h = TestHarness::new();
    h.add_box("old", 0.0, 0.0);
    let plan: shared::FloorPlanImport = serde_json::from_str(
        r#"{
            "dimensions": {"width": 10, "length": 12, "height": 3},
            "rooms": [
                {"id": "r1", "name": "Living", "type": "living", "bounds": {"x": 1, "y": 2, "width": 4, "height": 2}},
                {"id": "r2", "name": "Bath", "type": "bathroom", "bounds": {"x": 5, "y": 2, "width": 2, "height": 2}}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(h.room_mut().apply_floor_plan(&plan), Ok(1));
    assert_eq!(h.room().design.room.width, 10.0);
    assert_eq!(h.furniture_count(), 1);
    let sofa = &h.room().furniture()[0];
    assert_eq!(sofa.position(), [2.0, 0.0, 3.0]);

    assert!(h.undo());
    assert!(h.furniture("old").is_some());
}

// ── Moodboard ───────────────────────────────────────────────────

#[test]
fn test_scale_fold_compounds() {
    let mut h = TestHarness::new();
    let id = h.moodboard_mut().add_image("room.jpg");
    let k: f64 = 1.1;

    for _ in 0..3 {
        let f = h.moodboard().get(&id).unwrap().frame.clone();
        let t = NodeTransform {
            x: f.x,
            y: f.y,
            rotation: f.rotation,
            scale_x: k,
            scale_y: k,
        };
        assert!(h.moodboard_mut().apply_transform(&id, t));
        assert_eq!(h.moodboard().node_scale(&id), (1.0, 1.0));
    }

    let f = &h.moodboard().get(&id).unwrap().frame;
    assert!(approx(f.width, 200.0 * k.powi(3)), "width = {}", f.width);
    assert!(approx(f.height, 150.0 * k.powi(3)), "height = {}", f.height);
    assert_eq!(h.moodboard().history_len(), 5);
}

#[test]
fn test_moodboard_edit_session() {
    let mut h = TestHarness::new();
    let board = h.moodboard_mut();
    let a = board.add_color_swatch(None);
    let b = board.add_text();

    assert!(board.drag_start(&a));
    board.drag_move(&a, 10.0, 10.0);
    assert!(board.drag_end(&a, 20.0, 20.0));

    assert!(board.bring_forward(&a));
    let top = board.paint_order().last().map(|e| e.id().clone());
    assert_eq!(top.as_ref(), Some(&a));

    assert!(board.undo());
    let top = board.paint_order().last().map(|e| e.id().clone());
    assert_eq!(top.as_ref(), Some(&b));

    assert!(board.delete_element(&b));
    assert_eq!(board.elements().len(), 1);
    assert!(!board.can_redo());
}

#[test]
fn test_moodboard_round_trips_through_json() {
    let mut h = TestHarness::new();
    h.moodboard_mut()
        .generate_from_measurements(&shared::RoomMeasurements::default());
    let json = h.export_moodboard_json();

    let mut other = TestHarness::new();
    other.load_moodboard_json(&json).unwrap();
    assert_eq!(other.moodboard().elements(), h.moodboard().elements());
    assert_eq!(other.moodboard().name, "Modern Living Room");
}
