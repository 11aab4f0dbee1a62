//! Результат мастера «2D → 3D» (ручной ввод размеров и комнат)

use serde::{Deserialize, Serialize};

/// Тип помещения на плане
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanRoomKind {
    Living,
    Kitchen,
    Bedroom,
    Bathroom,
    Dining,
    Office,
    Guest,
    Utility,
}

/// Прямоугольник помещения в координатах плана (метры)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlanBounds {
    /// Центр прямоугольника
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Помещение, отмеченное пользователем
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRoom {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlanRoomKind,
    pub bounds: PlanBounds,
}

/// Размеры плана
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanDimensions {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

/// Данные импорта плана этажа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanImport {
    pub dimensions: PlanDimensions,
    #[serde(default = "default_plan_scale")]
    pub scale: f64,
    #[serde(default)]
    pub rooms: Vec<PlanRoom>,
}

fn default_plan_scale() -> f64 {
    1.0
}
