//! Integration tests for the JSON command protocol.

use roomboard_editor_lib::command::{execute_json, execute_json_batch};
use roomboard_editor_lib::harness::TestHarness;
use roomboard_editor_lib::viewport::furniture_controller::DragMode;

#[test]
fn test_room_script_end_to_end() {
    let mut h = TestHarness::new();
    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command": "add_furniture", "slug": "sofa"},
            {"command": "add_furniture", "template": {"name": "Crate"}},
            {"command": "inspect_room"}
        ]"#,
    )
    .unwrap();
    assert!(responses.iter().all(|r| r.success));

    let inspect = responses[2].data.as_ref().unwrap();
    assert_eq!(inspect["furniture_count"], 2);
    assert_eq!(inspect["furniture"][1]["type"], "generic");
    assert_eq!(inspect["furniture"][1]["name"], "Crate");
}

#[test]
fn test_drag_command_clamps_and_undo_reverts() {
    let mut h = TestHarness::new();
    let id = h.add_box("a", 0.0, 0.0);

    let resp = execute_json(&mut h, &format!(r#"{{"command": "drag_furniture", "id": "{id}", "x": 9, "z": -9}}"#)).unwrap();
    assert!(resp.success);
    let pos = &resp.data.unwrap()["position"];
    assert!((pos[0].as_f64().unwrap() - 2.3).abs() < 1e-6);
    assert_eq!(pos[1].as_f64().unwrap(), 0.0);
    assert!((pos[2].as_f64().unwrap() + 3.3).abs() < 1e-6);

    execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
    assert_eq!(h.position_of("a").unwrap(), [0.0, 0.0, 0.0]);
}

#[test]
fn test_pointer_commands_and_fallback() {
    let mut h = TestHarness::new();
    h.add_box("a", 0.0, 0.0);
    let at = h.screen_of_instance("a").unwrap();

    let down = format!(r#"{{"command": "pointer_down", "x": {}, "y": {}}}"#, at.x, at.y);
    let resp = execute_json(&mut h, &down).unwrap();
    assert_eq!(resp.data.unwrap()["hit"], "a");
    assert!(!h.camera_enabled());

    let resp = execute_json(&mut h, r#"{"command": "global_pointer_up"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["recovered"][0], "a");
    assert!(h.camera_enabled());
}

#[test]
fn test_select_command_mid_drag_ends_old_drag() {
    let mut h = TestHarness::new();
    h.add_box("a", -1.5, 1.5);
    h.add_box("b", 1.5, -1.5);
    assert_eq!(h.press_on("a", false).as_deref(), Some("a"));
    assert!(!h.camera_enabled());

    let resp = execute_json(&mut h, r#"{"command": "select_furniture", "id": "b"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(h.viewport.controller("a").unwrap().mode(), DragMode::Idle);
    assert!(h.camera_enabled());

    // A later move drags nothing
    h.move_to_floor(0.0, 0.0);
    assert_eq!(h.position_of("a").unwrap(), [-1.5, 0.0, 1.5]);
    assert_eq!(h.position_of("b").unwrap(), [1.5, 0.0, -1.5]);
}

#[test]
fn test_clear_selection_command_mid_drag_restores_camera() {
    let mut h = TestHarness::new();
    h.add_box("a", 0.0, 0.0);
    h.press_on("a", false);

    let resp = execute_json(&mut h, r#"{"command": "clear_selection"}"#).unwrap();
    assert!(resp.success);
    assert!(h.room().selected().is_none());
    assert!(h.viewport.dragging().is_none());
    assert!(h.camera_enabled());
}

#[test]
fn test_set_room_rejects_invalid() {
    let mut h = TestHarness::new();
    let resp = execute_json(&mut h, r#"{"command": "set_room", "width": -1, "length": 8, "height": 3}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["changed"], false);
    assert_eq!(data["room"]["width"], 6.0);

    let resp = execute_json(&mut h, r#"{"command": "set_room", "width": 40, "length": 8, "height": 3}"#).unwrap();
    assert_eq!(resp.data.unwrap()["room"]["width"], 15.0);
}

#[test]
fn test_floor_plan_command_reports_errors() {
    let mut h = TestHarness::new();
    let resp = execute_json(
        &mut h,
        r#"{"command": "import_floor_plan", "plan": {"dimensions": {"width": 0, "length": 5, "height": 3}}}"#,
    )
    .unwrap();
    assert!(!resp.success);
    assert!(resp.error.unwrap().contains("Invalid floor plan"));
}

#[test]
fn test_moodboard_script() {
    let mut h = TestHarness::new();
    let responses = execute_json_batch(
        &mut h,
        r##"[
            {"command": "generate_moodboard", "measurements": {"width": 10, "length": 12, "style": "Scandinavian", "primaryUse": "Home Office"}},
            {"command": "add_color", "fill": "#123456"},
            {"command": "canvas_click", "x": 5, "y": 590}
        ]"##,
    )
    .unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(responses[0].data.as_ref().unwrap()["element_count"], 7);
    assert_eq!(h.moodboard().name, "Scandinavian Home Office");
    assert_eq!(h.moodboard().elements().len(), 8);
    assert!(h.moodboard().selected().is_none());

    let swatch = h.moodboard().elements()[7].id().clone();
    let transform = format!(
        r#"{{"command": "transform_element", "id": "{swatch}", "transform": {{"x": 0, "y": 0, "rotation": 0, "scale_x": 2, "scale_y": 2}}}}"#
    );
    let resp = execute_json(&mut h, &transform).unwrap();
    assert_eq!(resp.data.unwrap()["committed"], true);
    assert_eq!(h.moodboard().get(&swatch).unwrap().frame.width, 200.0);

    let resp = execute_json(&mut h, &format!(r#"{{"command": "send_backward", "id": "{swatch}"}}"#)).unwrap();
    assert_eq!(resp.data.unwrap()["moved"], true);
    assert_eq!(h.moodboard().get(&swatch).unwrap().z_index(), 8);
}

#[test]
fn test_export_commands() {
    let mut h = TestHarness::new();
    execute_json(&mut h, r#"{"command": "add_text"}"#).unwrap();
    let data = execute_json(&mut h, r#"{"command": "export_moodboard"}"#)
        .unwrap()
        .data
        .unwrap();
    let doc: shared::MoodboardDocument =
        serde_json::from_str(data["moodboard_json"].as_str().unwrap()).unwrap();
    assert_eq!(doc.elements.len(), 1);
}
