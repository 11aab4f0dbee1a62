//! Элементы 2D-мудборда

use serde::{Deserialize, Serialize};

use crate::ObjectId;

fn default_version() -> u32 {
    1
}

/// Общая геометрия любого элемента холста
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFrame {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    /// Порядок отрисовки: больший индекс рисуется поверх
    #[serde(default)]
    pub z_index: i64,
    /// Временный флаг активного перетаскивания (только визуальный), не сохраняется
    #[serde(default, skip_serializing)]
    pub is_dragging: bool,
}

impl ElementFrame {
    pub fn new(id: ObjectId, x: f64, y: f64, width: f64, height: f64, z_index: i64) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            z_index,
            is_dragging: false,
        }
    }
}

/// Содержимое элемента (закрытое множество вариантов)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ElementContent {
    Image {
        src: String,
    },
    Text {
        text: String,
        font_size: f64,
        font_family: String,
        fill: String,
    },
    #[serde(rename = "color")]
    ColorSwatch {
        fill: String,
    },
}

impl ElementContent {
    /// Минимальный размер стороны при изменении размера
    pub fn min_size(&self) -> f64 {
        match self {
            ElementContent::Image { .. } => 5.0,
            ElementContent::Text { .. } => 10.0,
            ElementContent::ColorSwatch { .. } => 10.0,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ElementContent::Image { .. } => "image",
            ElementContent::Text { .. } => "text",
            ElementContent::ColorSwatch { .. } => "color",
        }
    }
}

/// Элемент мудборда: изображение, текст или образец цвета
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodboardElement {
    #[serde(flatten)]
    pub frame: ElementFrame,
    #[serde(flatten)]
    pub content: ElementContent,
}

impl MoodboardElement {
    pub fn id(&self) -> &ObjectId {
        &self.frame.id
    }

    pub fn z_index(&self) -> i64 {
        self.frame.z_index
    }
}

/// Сохраняемый мудборд
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodboardDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub elements: Vec<MoodboardElement>,
}

impl Default for MoodboardDocument {
    fn default() -> Self {
        Self {
            version: 1,
            name: "Untitled Moodboard".to_string(),
            elements: Vec::new(),
        }
    }
}

/// Параметры комнаты для автоматической генерации мудборда
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMeasurements {
    /// Ширина в футах
    pub width: f64,
    /// Длина в футах
    pub length: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub windows: u32,
    #[serde(default)]
    pub doors: u32,
    pub style: String,
    #[serde(default)]
    pub budget: String,
    pub primary_use: String,
}

impl Default for RoomMeasurements {
    fn default() -> Self {
        Self {
            width: 12.0,
            length: 15.0,
            height: 8.0,
            windows: 1,
            doors: 1,
            style: "Modern".to_string(),
            budget: "$5,000 - $10,000".to_string(),
            primary_use: "Living Room".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_element_wire_format() {
        let el = MoodboardElement {
            frame: ElementFrame::new("3".into(), 150.0, 300.0, 200.0, 30.0, 3),
            content: ElementContent::Text {
                text: "Modern Living Room".into(),
                font_size: 24.0,
                font_family: "Inter".into(),
                fill: "#333333".into(),
            },
        };
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["fontSize"], 24.0);
        assert_eq!(json["fontFamily"], "Inter");
        assert_eq!(json["zIndex"], 3);
        assert!(json.get("isDragging").is_none());
    }

    #[test]
    fn test_parse_color_swatch() {
        let json = r##"{"id":"2","type":"color","x":400,"y":200,"width":100,"height":100,
            "fill":"#94A684","rotation":0,"isDragging":true,"zIndex":2}"##;
        let el: MoodboardElement = serde_json::from_str(json).unwrap();
        assert!(matches!(el.content, ElementContent::ColorSwatch { ref fill } if fill == "#94A684"));
        assert_eq!(el.z_index(), 2);
        assert!(el.frame.is_dragging);
        assert_eq!(el.content.min_size(), 10.0);
    }

    #[test]
    fn test_measurements_parse_with_defaults() {
        let json = r#"{"width":10,"length":12.5,"style":"Industrial","primaryUse":"Bedroom"}"#;
        let m: RoomMeasurements = serde_json::from_str(json).unwrap();
        assert_eq!(m.length, 12.5);
        assert_eq!(m.primary_use, "Bedroom");
        assert_eq!(m.windows, 0);
    }

    #[test]
    fn test_unknown_element_type_rejected() {
        let json = r#"{"id":"9","type":"video","x":0,"y":0,"width":1,"height":1}"#;
        assert!(serde_json::from_str::<MoodboardElement>(json).is_err());
    }
}
