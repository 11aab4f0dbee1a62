//! JSON command protocol for scripted editing.
//!
//! Each command maps onto one session or viewport operation of the headless
//! harness. Room and moodboard commands share one tagged enum.

use serde::{Deserialize, Serialize};
use shared::{FloorPlanImport, Footprint, MaterialKind, RoomMeasurements};

use crate::catalog::{find_template, FurnitureTemplate};
use crate::harness::TestHarness;
use crate::state::moodboard::NodeTransform;

fn default_true() -> bool {
    true
}

/// A scripted editor command.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    // ── Room ──────────────────────────────────────────────────
    /// Add furniture from a built-in catalog slug or an inline template
    AddFurniture {
        #[serde(default)]
        slug: Option<String>,
        #[serde(default)]
        template: Option<FurnitureTemplate>,
    },
    DeleteFurniture {
        id: String,
    },
    DuplicateFurniture {
        id: String,
    },
    /// Property edits; every present field is applied as its own step
    UpdateFurniture {
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        material: Option<MaterialKind>,
        #[serde(default)]
        dimensions: Option<Footprint>,
        #[serde(default)]
        yaw: Option<f64>,
        #[serde(default)]
        position: Option<[f64; 2]>,
        #[serde(default)]
        scale: Option<[f64; 3]>,
    },
    SelectFurniture {
        id: String,
    },
    ClearSelection,
    /// Pointer press at screen coordinates of the room viewport
    PointerDown {
        x: f32,
        y: f32,
        #[serde(default)]
        shift: bool,
    },
    PointerMove {
        x: f32,
        y: f32,
        #[serde(default)]
        shift: bool,
    },
    PointerUp,
    /// Release that only the document-level listener saw
    GlobalPointerUp,
    /// Drag an instance so the pointer ends over floor point (x, z)
    DragFurniture {
        id: String,
        x: f64,
        z: f64,
    },
    SetRoom {
        width: f64,
        length: f64,
        height: f64,
    },
    ImportFloorPlan {
        plan: FloorPlanImport,
    },
    SetCameraEnabled {
        #[serde(default = "default_true")]
        enabled: bool,
    },
    Undo,
    Redo,
    InspectRoom,
    ExportRoom,

    // ── Moodboard ─────────────────────────────────────────────
    AddImage {
        src: String,
    },
    AddColor {
        #[serde(default)]
        fill: Option<String>,
    },
    AddText,
    DeleteElement {
        id: String,
    },
    DuplicateElement {
        id: String,
    },
    /// Click on the canvas stage; empty background clears the selection
    CanvasClick {
        x: f64,
        y: f64,
    },
    /// Drag an element and drop it at (x, y)
    MoveElement {
        id: String,
        x: f64,
        y: f64,
    },
    TransformElement {
        id: String,
        transform: NodeTransform,
    },
    EditText {
        id: String,
        text: String,
    },
    BringForward {
        id: String,
    },
    SendBackward {
        id: String,
    },
    GenerateMoodboard {
        measurements: RoomMeasurements,
    },
    SetZoom {
        zoom: f64,
    },
    MoodboardUndo,
    MoodboardRedo,
    ExportMoodboard,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn update_furniture(h: &mut TestHarness, cmd: EditorCommand) -> CommandResponse {
    let EditorCommand::UpdateFurniture {
        id,
        name,
        color,
        material,
        dimensions,
        yaw,
        position,
        scale,
    } = cmd
    else {
        return CommandResponse::err("Not a furniture update");
    };
    if h.furniture(&id).is_none() {
        return CommandResponse::err(format!("No furniture with id {id}"));
    }

    let room = h.room_mut();
    let mut applied = Vec::new();
    if let Some(name) = name {
        applied.push(("name", room.rename_furniture(&id, &name)));
    }
    if let Some(color) = color {
        applied.push(("color", room.set_color(&id, &color)));
    }
    if let Some(material) = material {
        applied.push(("material", room.set_material(&id, material)));
    }
    if let Some(fp) = dimensions {
        applied.push(("dimensions", room.set_footprint(&id, fp)));
    }
    if let Some(yaw) = yaw {
        applied.push(("yaw", room.set_yaw(&id, yaw)));
    }
    if let Some([x, z]) = position {
        applied.push(("position", room.set_floor_position(&id, x, z)));
    }
    if let Some(scale) = scale {
        applied.push(("scale", room.set_scale(&id, scale)));
    }
    let applied: serde_json::Map<String, serde_json::Value> = applied
        .into_iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::Bool(v)))
        .collect();
    CommandResponse::ok_with_data(serde_json::json!({ "applied": applied }))
}

/// Execute a single command on the harness.
pub fn execute_command(h: &mut TestHarness, cmd: EditorCommand) -> CommandResponse {
    match cmd {
        EditorCommand::AddFurniture { slug, template } => {
            let template = match (slug, template) {
                (Some(slug), _) => match find_template(&slug) {
                    Some(t) => t,
                    None => return CommandResponse::err(format!("Unknown catalog item: {slug}")),
                },
                (None, Some(t)) => t,
                (None, None) => FurnitureTemplate::default(),
            };
            let id = h.add_template(&template);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::DeleteFurniture { id } => {
            let removed = h.delete_furniture(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        EditorCommand::DuplicateFurniture { id } => match h.room_mut().duplicate_furniture(&id) {
            Some(new_id) => CommandResponse::ok_with_data(serde_json::json!({ "id": new_id })),
            None => CommandResponse::err(format!("No furniture with id {id}")),
        },

        cmd @ EditorCommand::UpdateFurniture { .. } => update_furniture(h, cmd),

        EditorCommand::SelectFurniture { id } => {
            if !h.select_furniture(&id) {
                return CommandResponse::err(format!("No furniture with id {id}"));
            }
            CommandResponse::ok_with_data(serde_json::json!({ "selected": id }))
        }

        EditorCommand::ClearSelection => {
            h.clear_selection();
            CommandResponse::ok()
        }

        EditorCommand::PointerDown { x, y, shift } => {
            let hit = h.press_at(egui::pos2(x, y), shift);
            CommandResponse::ok_with_data(serde_json::json!({ "hit": hit }))
        }

        EditorCommand::PointerMove { x, y, shift } => {
            let changed = h.move_to(egui::pos2(x, y), shift);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::PointerUp => {
            let ended = h.release();
            CommandResponse::ok_with_data(serde_json::json!({ "ended": ended }))
        }

        EditorCommand::GlobalPointerUp => {
            let recovered = h.release_outside();
            CommandResponse::ok_with_data(serde_json::json!({ "recovered": recovered }))
        }

        EditorCommand::DragFurniture { id, x, z } => {
            if h.furniture(&id).is_none() {
                return CommandResponse::err(format!("No furniture with id {id}"));
            }
            if !h.drag_furniture_to(&id, x, z) {
                return CommandResponse::err(format!("Furniture {id} is not reachable by the pointer"));
            }
            CommandResponse::ok_with_data(serde_json::json!({ "position": h.position_of(&id) }))
        }

        EditorCommand::SetRoom { width, length, height } => {
            let changed = h.room_mut().set_room(width, length, height);
            CommandResponse::ok_with_data(serde_json::json!({
                "changed": changed,
                "room": h.room().design.room,
            }))
        }

        EditorCommand::ImportFloorPlan { plan } => match h.room_mut().apply_floor_plan(&plan) {
            Ok(placed) => {
                h.viewport.sync(&h.state.room);
                CommandResponse::ok_with_data(serde_json::json!({ "placed": placed }))
            }
            Err(e) => CommandResponse::err(e),
        },

        EditorCommand::SetCameraEnabled { enabled } => {
            h.viewport.controls_mut().set_preference(enabled);
            CommandResponse::ok_with_data(serde_json::json!({ "camera_enabled": h.camera_enabled() }))
        }

        EditorCommand::Undo => {
            let success = h.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        EditorCommand::Redo => {
            let success = h.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        EditorCommand::InspectRoom => {
            let furniture: Vec<serde_json::Value> = h
                .room()
                .furniture()
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "id": f.id,
                        "type": f.kind.as_str(),
                        "name": f.display_name,
                        "position": f.position(),
                        "yaw": f.yaw(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "room": h.room().design.room,
                "furniture_count": furniture.len(),
                "furniture": furniture,
                "selected": h.room().selected(),
                "camera_enabled": h.camera_enabled(),
            }))
        }

        EditorCommand::ExportRoom => match h.room().to_json() {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "design_json": json })),
            Err(e) => CommandResponse::err(e),
        },

        EditorCommand::AddImage { src } => {
            let id = h.moodboard_mut().add_image(&src);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::AddColor { fill } => {
            let id = h.moodboard_mut().add_color_swatch(fill.as_deref());
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::AddText => {
            let id = h.moodboard_mut().add_text();
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::DeleteElement { id } => {
            let removed = h.moodboard_mut().delete_element(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        EditorCommand::DuplicateElement { id } => match h.moodboard_mut().duplicate_element(&id) {
            Some(new_id) => CommandResponse::ok_with_data(serde_json::json!({ "id": new_id })),
            None => CommandResponse::err(format!("No element with id {id}")),
        },

        EditorCommand::CanvasClick { x, y } => {
            let hit = h.moodboard_mut().pointer_down(x, y);
            CommandResponse::ok_with_data(serde_json::json!({ "selected": hit }))
        }

        EditorCommand::MoveElement { id, x, y } => {
            let board = h.moodboard_mut();
            if !board.drag_start(&id) {
                return CommandResponse::err(format!("No element with id {id}"));
            }
            board.drag_move(&id, x, y);
            let committed = board.drag_end(&id, x, y);
            CommandResponse::ok_with_data(serde_json::json!({ "committed": committed }))
        }

        EditorCommand::TransformElement { id, transform } => {
            let committed = h.moodboard_mut().apply_transform(&id, transform);
            CommandResponse::ok_with_data(serde_json::json!({ "committed": committed }))
        }

        EditorCommand::EditText { id, text } => {
            let changed = h.moodboard_mut().update_text(&id, &text);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::BringForward { id } => {
            let moved = h.moodboard_mut().bring_forward(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "moved": moved }))
        }

        EditorCommand::SendBackward { id } => {
            let moved = h.moodboard_mut().send_backward(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "moved": moved }))
        }

        EditorCommand::GenerateMoodboard { measurements } => {
            let board = h.moodboard_mut();
            board.generate_from_measurements(&measurements);
            CommandResponse::ok_with_data(serde_json::json!({
                "name": board.name,
                "element_count": board.elements().len(),
            }))
        }

        EditorCommand::SetZoom { zoom } => {
            let board = h.moodboard_mut();
            board.set_zoom(zoom);
            CommandResponse::ok_with_data(serde_json::json!({ "zoom": board.zoom() }))
        }

        EditorCommand::MoodboardUndo => {
            let success = h.moodboard_mut().undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        EditorCommand::MoodboardRedo => {
            let success = h.moodboard_mut().redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        EditorCommand::ExportMoodboard => match h.moodboard().to_json() {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "moodboard_json": json })),
            Err(e) => CommandResponse::err(e),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(h: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: EditorCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(h, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(h: &mut TestHarness, json: &str) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<EditorCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds.into_iter().map(|cmd| execute_command(h, cmd)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_undo() {
        let cmd: EditorCommand = serde_json::from_str(r#"{"command": "undo"}"#).unwrap();
        assert!(matches!(cmd, EditorCommand::Undo));
    }

    #[test]
    fn test_command_serde_add_furniture_template() {
        let json = r#"{"command": "add_furniture", "template": {"type": "sofa", "dimensions": {"width": 2, "height": 0.8, "depth": 0.9}}}"#;
        match serde_json::from_str::<EditorCommand>(json).unwrap() {
            EditorCommand::AddFurniture { slug: None, template: Some(t) } => {
                assert_eq!(t.kind, Some(shared::FurnitureKind::Sofa));
                assert!(t.color.is_none());
            }
            other => panic!("Expected AddFurniture, got {other:?}"),
        }
    }

    #[test]
    fn test_command_serde_transform_element() {
        let json = r#"{"command": "transform_element", "id": "e1", "transform": {"x": 1, "y": 2, "rotation": 0, "scale_x": 2, "scale_y": 1.5}}"#;
        match serde_json::from_str::<EditorCommand>(json).unwrap() {
            EditorCommand::TransformElement { id, transform } => {
                assert_eq!(id, "e1");
                assert_eq!(transform.scale_y, 1.5);
            }
            other => panic!("Expected TransformElement, got {other:?}"),
        }
    }

    #[test]
    fn test_execute_add_and_inspect() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "add_furniture", "slug": "bookshelf"}"#).unwrap();
        assert!(resp.success);

        let resp = execute_json(&mut h, r#"{"command": "inspect_room"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["furniture_count"], 1);
        assert_eq!(data["furniture"][0]["type"], "bookshelf");
    }

    #[test]
    fn test_execute_unknown_slug_fails() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "add_furniture", "slug": "hovercraft"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("hovercraft"));
    }

    #[test]
    fn test_execute_update_reports_each_field() {
        let mut h = TestHarness::new();
        let id = h.add_box("a", 0.0, 0.0);
        let json = format!(r#"{{"command": "update_furniture", "id": "{id}", "color": "red", "yaw": 1.0}}"#);
        let data = execute_json(&mut h, &json).unwrap().data.unwrap();
        assert_eq!(data["applied"]["color"], false);
        assert_eq!(data["applied"]["yaw"], true);
    }

    #[test]
    fn test_execute_undo_redo() {
        let mut h = TestHarness::new();
        h.add_box("a", 0.0, 0.0);

        let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["undone"], true);
        assert_eq!(h.furniture_count(), 0);

        let resp = execute_json(&mut h, r#"{"command": "redo"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["redone"], true);
        assert_eq!(h.furniture_count(), 1);
    }

    #[test]
    fn test_execute_export_room() {
        let mut h = TestHarness::new();
        h.add_box("a", 0.0, 0.0);
        let data = execute_json(&mut h, r#"{"command": "export_room"}"#).unwrap().data.unwrap();
        assert!(data["design_json"].as_str().unwrap().contains("furniture"));
    }

    #[test]
    fn test_execute_moodboard_batch() {
        let mut h = TestHarness::new();
        let json = r#"[
            {"command": "add_color"},
            {"command": "add_text"},
            {"command": "moodboard_undo"},
            {"command": "export_moodboard"}
        ]"#;
        let responses = execute_json_batch(&mut h, json).unwrap();
        assert!(responses.iter().all(|r| r.success));
        assert_eq!(h.moodboard().elements().len(), 1);
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        assert!(execute_json(&mut h, "not valid json").is_err());
        assert!(execute_json(&mut h, r#"{"command": "teleport"}"#).is_err());
    }
}
