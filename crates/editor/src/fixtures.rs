//! Factory functions for creating test data.
//!
//! Provides helpers to construct furniture, room designs, moodboard elements
//! and ready-made sessions used in tests and by the command interface.

use shared::*;

use crate::state::moodboard::MoodboardSession;
use crate::state::room::RoomSession;

// ── Furniture factories ─────────────────────────────────────────

/// Create a furniture instance of any kind and footprint on the floor at (x, z).
pub fn furniture(id: &str, kind: FurnitureKind, footprint: Footprint, x: f64, z: f64) -> FurnitureInstance {
    FurnitureInstance {
        id: id.to_string(),
        display_name: kind.as_str().to_string(),
        kind,
        transform: Transform::on_floor(x, z),
        color: "#8B4513".to_string(),
        material_kind: MaterialKind::Wood,
        footprint,
    }
}

/// Create a generic 1×1×1 box on the floor at (x, z).
pub fn unit_box(id: &str, x: f64, z: f64) -> FurnitureInstance {
    furniture(id, FurnitureKind::Generic, Footprint::new(1.0, 1.0, 1.0), x, z)
}

// ── Room factories ──────────────────────────────────────────────

/// Default 6×8×3 room holding the given furniture.
pub fn room_design_with(furniture: Vec<FurnitureInstance>) -> RoomDesign {
    RoomDesign {
        furniture,
        ..RoomDesign::default()
    }
}

/// Room session over `room_design_with(furniture)` with an empty history.
pub fn room_session_with(furniture: Vec<FurnitureInstance>) -> RoomSession {
    RoomSession::new(room_design_with(furniture))
}

// ── Moodboard factories ─────────────────────────────────────────

/// 100×100 color swatch.
pub fn swatch(id: &str, x: f64, y: f64, z_index: i64) -> MoodboardElement {
    MoodboardElement {
        frame: ElementFrame::new(id.to_string(), x, y, 100.0, 100.0, z_index),
        content: ElementContent::ColorSwatch {
            fill: "#94A684".to_string(),
        },
    }
}

/// 200×150 image.
pub fn image(id: &str, x: f64, y: f64, z_index: i64) -> MoodboardElement {
    MoodboardElement {
        frame: ElementFrame::new(id.to_string(), x, y, 200.0, 150.0, z_index),
        content: ElementContent::Image {
            src: format!("https://example.com/{id}.jpg"),
        },
    }
}

/// 200×30 text, 24pt Inter.
pub fn text(id: &str, x: f64, y: f64, z_index: i64) -> MoodboardElement {
    MoodboardElement {
        frame: ElementFrame::new(id.to_string(), x, y, 200.0, 30.0, z_index),
        content: ElementContent::Text {
            text: "Modern Living Room".to_string(),
            font_size: 24.0,
            font_family: "Inter".to_string(),
            fill: "#333333".to_string(),
        },
    }
}

/// Moodboard session over these elements with an empty history.
pub fn moodboard_with(elements: Vec<MoodboardElement>) -> MoodboardSession {
    MoodboardSession::new(MoodboardDocument {
        elements,
        ..MoodboardDocument::default()
    })
}

// ── Viewport ────────────────────────────────────────────────────

/// 800×600 viewport at the origin.
pub fn viewport_rect() -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
}
