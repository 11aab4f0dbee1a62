//! Adding, duplicating, deleting and generating moodboard elements

use shared::{ElementContent, ElementFrame, MoodboardElement, ObjectId, RoomMeasurements};

use super::MoodboardSession;

/// Cycled fill colors for new swatches
pub const SWATCH_PALETTE: [&str; 6] = ["#94A684", "#E4DEBE", "#B09E82", "#7D9D9C", "#E4C988", "#F97B8B"];

/// Style name → three swatch colors. Unknown styles use the first entry.
pub const STYLE_PALETTES: [(&str, [&str; 3]); 4] = [
    ("Modern", ["#2C3E50", "#E74C3C", "#ECF0F1"]),
    ("Scandinavian", ["#FFFFFF", "#808080", "#000000"]),
    ("Industrial", ["#34495E", "#95A5A6", "#7F8C8D"]),
    ("Minimalist", ["#FFFFFF", "#BFBFBF", "#4A4A4A"]),
];

/// Room use → two reference images. Unknown uses fall back to the living room.
const USE_IMAGES: [(&str, [&str; 2]); 3] = [
    (
        "Living Room",
        [
            "https://images.pexels.com/photos/1866149/pexels-photo-1866149.jpeg?auto=compress&cs=tinysrgb&w=300",
            "https://images.pexels.com/photos/2762247/pexels-photo-2762247.jpeg?auto=compress&cs=tinysrgb&w=300",
        ],
    ),
    (
        "Bedroom",
        [
            "https://images.pexels.com/photos/775219/pexels-photo-775219.jpeg?auto=compress&cs=tinysrgb&w=300",
            "https://images.pexels.com/photos/2249051/pexels-photo-2249051.jpeg?auto=compress&cs=tinysrgb&w=300",
        ],
    ),
    (
        "Home Office",
        [
            "https://images.pexels.com/photos/1957477/pexels-photo-1957477.jpeg?auto=compress&cs=tinysrgb&w=300",
            "https://images.pexels.com/photos/2528118/pexels-photo-2528118.jpeg?auto=compress&cs=tinysrgb&w=300",
        ],
    ),
];

const IMAGE_SIZE: (f64, f64) = (200.0, 150.0);
const SWATCH_SIZE: (f64, f64) = (100.0, 100.0);
const TEXT_SIZE: (f64, f64) = (200.0, 30.0);
const DUPLICATE_OFFSET: f64 = 20.0;

fn new_id() -> ObjectId {
    uuid::Uuid::new_v4().to_string()
}

fn text_content(text: String, font_size: f64, fill: &str) -> ElementContent {
    ElementContent::Text {
        text,
        font_size,
        font_family: "Inter".to_string(),
        fill: fill.to_string(),
    }
}

fn element(x: f64, y: f64, (w, h): (f64, f64), z: i64, content: ElementContent) -> MoodboardElement {
    MoodboardElement {
        frame: ElementFrame::new(new_id(), x, y, w, h, z),
        content,
    }
}

/// Deterministic moodboard layout for a room: dimensions and style captions,
/// two images for the room use, three swatches for the style
pub fn generate_elements(m: &RoomMeasurements) -> Vec<MoodboardElement> {
    let mut out = vec![
        element(
            50.0,
            30.0,
            (300.0, 30.0),
            1,
            text_content(format!("{}' × {}' {}", m.width, m.length, m.primary_use), 24.0, "#333333"),
        ),
        element(
            50.0,
            70.0,
            (200.0, 24.0),
            2,
            text_content(format!("Style: {}", m.style), 18.0, "#666666"),
        ),
    ];

    let images = USE_IMAGES
        .iter()
        .find(|(name, _)| *name == m.primary_use)
        .unwrap_or(&USE_IMAGES[0])
        .1;
    for (i, src) in images.iter().enumerate() {
        out.push(element(
            100.0 + i as f64 * 250.0,
            150.0,
            IMAGE_SIZE,
            i as i64 + 3,
            ElementContent::Image { src: src.to_string() },
        ));
    }

    let colors = STYLE_PALETTES
        .iter()
        .find(|(name, _)| *name == m.style)
        .unwrap_or(&STYLE_PALETTES[0])
        .1;
    for (i, fill) in colors.iter().enumerate() {
        out.push(element(
            50.0 + i as f64 * 120.0,
            350.0,
            SWATCH_SIZE,
            i as i64 + 6,
            ElementContent::ColorSwatch { fill: fill.to_string() },
        ));
    }
    out
}

impl MoodboardSession {
    fn next_z(&self) -> i64 {
        self.elements.len() as i64 + 1
    }

    /// Top-left that centers a box of this size on the stage
    fn centered(&self, (w, h): (f64, f64)) -> (f64, f64) {
        (self.canvas.stage_width / 2.0 - w / 2.0, self.canvas.stage_height / 2.0 - h / 2.0)
    }

    fn push_element(&mut self, content: ElementContent, size: (f64, f64)) -> ObjectId {
        let (x, y) = self.centered(size);
        let el = element(x, y, size, self.next_z(), content);
        let id = el.id().clone();
        tracing::info!("Added {} element {id}", el.content.type_name());
        self.elements.push(el);
        self.selected = Some(id.clone());
        self.commit();
        id
    }

    pub fn add_image(&mut self, src: &str) -> ObjectId {
        self.push_element(ElementContent::Image { src: src.to_string() }, IMAGE_SIZE)
    }

    /// Add a color swatch; without a fill the next palette color is used
    pub fn add_color_swatch(&mut self, fill: Option<&str>) -> ObjectId {
        let fill = match fill {
            Some(f) if crate::validation::is_hex_color(f) => f.to_string(),
            _ => {
                let f = SWATCH_PALETTE[self.palette_cursor % SWATCH_PALETTE.len()];
                self.palette_cursor += 1;
                f.to_string()
            }
        };
        self.push_element(ElementContent::ColorSwatch { fill }, SWATCH_SIZE)
    }

    pub fn add_text(&mut self) -> ObjectId {
        self.push_element(
            text_content("Double click to edit".to_string(), 24.0, "#333333"),
            TEXT_SIZE,
        )
    }

    pub fn delete_element(&mut self, id: &str) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id() != id);
        if self.elements.len() == before {
            return false;
        }
        if self.is_selected(id) {
            self.selected = None;
        }
        if matches!(&self.live_transform, Some((live, _)) if live == id) {
            self.live_transform = None;
        }
        tracing::info!("Deleted element {id}");
        self.commit();
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected.clone() {
            Some(id) => self.delete_element(&id),
            None => false,
        }
    }

    /// Copy an element offset by 20px with a fresh id on top of the stack
    pub fn duplicate_element(&mut self, id: &str) -> Option<ObjectId> {
        let mut copy = self.get(id)?.clone();
        copy.frame.id = new_id();
        copy.frame.x += DUPLICATE_OFFSET;
        copy.frame.y += DUPLICATE_OFFSET;
        copy.frame.z_index = self.next_z();
        copy.frame.is_dragging = false;
        let new_id = copy.frame.id.clone();
        self.elements.push(copy);
        self.selected = Some(new_id.clone());
        self.commit();
        Some(new_id)
    }

    pub fn update_text(&mut self, id: &str, value: &str) -> bool {
        let Some(ElementContent::Text { text, .. }) = self.get_mut(id).map(|e| &mut e.content) else {
            return false;
        };
        if text == value {
            return false;
        }
        *text = value.to_string();
        self.commit();
        true
    }

    /// Replace all elements with a generated layout (one history entry)
    pub fn generate_from_measurements(&mut self, m: &RoomMeasurements) {
        self.elements = generate_elements(m);
        self.name = format!("{} {}", m.style, m.primary_use);
        self.selected = None;
        self.live_transform = None;
        tracing::info!("Generated moodboard '{}' with {} elements", self.name, self.elements.len());
        self.commit();
    }
}
