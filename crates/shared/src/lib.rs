use serde::{Deserialize, Serialize};

pub mod floor_plan;
pub mod moodboard;

pub use floor_plan::{FloorPlanImport, PlanBounds, PlanDimensions, PlanRoom, PlanRoomKind};
pub use moodboard::{ElementContent, ElementFrame, MoodboardDocument, MoodboardElement, RoomMeasurements};

/// Уникальный идентификатор объекта в сцене
pub type ObjectId = String;

fn default_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn default_version() -> u32 {
    1
}

/// Трансформация объекта в координатах комнаты (метры, радианы)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    #[serde(default)]
    pub rotation: [f64; 3],
    #[serde(default = "default_scale")]
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    /// Трансформация на полу в точке (x, z)
    pub fn on_floor(x: f64, z: f64) -> Self {
        Self {
            position: [x, 0.0, z],
            ..Self::new()
        }
    }

    /// Поворот вокруг вертикальной оси (единственный редактируемый угол)
    pub fn yaw(&self) -> f64 {
        self.rotation[1]
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Мебель
// ============================================================================

/// Архетип мебели. Список открытый: неизвестные типы сохраняются как `Other`
/// и отображаются обычным параллелепипедом.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FurnitureKind {
    Chair,
    DiningChair,
    OfficeChair,
    Armchair,
    Sofa,
    Loveseat,
    LShapedSectional,
    CoffeeTable,
    DiningTable,
    RoundDiningTable,
    ExtendableDiningTable,
    SideTable,
    Nightstand,
    Bed,
    Dresser,
    Bookshelf,
    Wardrobe,
    Refrigerator,
    Stove,
    Bathtub,
    FloorLamp,
    TableLamp,
    Generic,
    Other(String),
}

impl FurnitureKind {
    /// Строковый идентификатор (как в каталоге и в сохранённых файлах)
    pub fn as_str(&self) -> &str {
        match self {
            FurnitureKind::Chair => "chair",
            FurnitureKind::DiningChair => "dining-chair",
            FurnitureKind::OfficeChair => "office-chair",
            FurnitureKind::Armchair => "armchair",
            FurnitureKind::Sofa => "sofa",
            FurnitureKind::Loveseat => "loveseat",
            FurnitureKind::LShapedSectional => "l-shaped-sectional",
            FurnitureKind::CoffeeTable => "coffee-table",
            FurnitureKind::DiningTable => "dining-table",
            FurnitureKind::RoundDiningTable => "round-dining-table",
            FurnitureKind::ExtendableDiningTable => "extendable-dining-table",
            FurnitureKind::SideTable => "side-table",
            FurnitureKind::Nightstand => "nightstand",
            FurnitureKind::Bed => "bed",
            FurnitureKind::Dresser => "dresser",
            FurnitureKind::Bookshelf => "bookshelf",
            FurnitureKind::Wardrobe => "wardrobe",
            FurnitureKind::Refrigerator => "refrigerator",
            FurnitureKind::Stove => "stove",
            FurnitureKind::Bathtub => "bathtub",
            FurnitureKind::FloorLamp => "floor-lamp",
            FurnitureKind::TableLamp => "table-lamp",
            FurnitureKind::Generic => "generic",
            FurnitureKind::Other(slug) => slug,
        }
    }

    /// Разбор идентификатора, включая синонимы из каталога
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "chair" => FurnitureKind::Chair,
            "dining-chair" => FurnitureKind::DiningChair,
            "office-chair" => FurnitureKind::OfficeChair,
            "armchair" => FurnitureKind::Armchair,
            "sofa" | "3-seat-sofa" => FurnitureKind::Sofa,
            "loveseat" | "2-seat-sofa" => FurnitureKind::Loveseat,
            "l-shaped-sectional" => FurnitureKind::LShapedSectional,
            "coffee-table" => FurnitureKind::CoffeeTable,
            "dining-table" => FurnitureKind::DiningTable,
            "round-dining-table" => FurnitureKind::RoundDiningTable,
            "extendable-dining-table" => FurnitureKind::ExtendableDiningTable,
            "side-table" => FurnitureKind::SideTable,
            "nightstand" => FurnitureKind::Nightstand,
            "bed" => FurnitureKind::Bed,
            "dresser" => FurnitureKind::Dresser,
            "bookshelf" => FurnitureKind::Bookshelf,
            "wardrobe" => FurnitureKind::Wardrobe,
            "refrigerator" => FurnitureKind::Refrigerator,
            "stove" | "oven" => FurnitureKind::Stove,
            "bathtub" => FurnitureKind::Bathtub,
            "floor-lamp" => FurnitureKind::FloorLamp,
            "table-lamp" => FurnitureKind::TableLamp,
            "generic" | "" => FurnitureKind::Generic,
            other => FurnitureKind::Other(other.to_string()),
        }
    }
}

impl From<String> for FurnitureKind {
    fn from(slug: String) -> Self {
        FurnitureKind::from_slug(&slug)
    }
}

impl From<FurnitureKind> for String {
    fn from(kind: FurnitureKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Параметры PBR-материала для рендера
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProps {
    pub roughness: f64,
    pub metalness: f64,
    pub opacity: f64,
    pub transparent: bool,
}

/// Тип материала мебели
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaterialKind {
    #[default]
    Wood,
    Metal,
    Fabric,
    Leather,
    Glass,
}

impl MaterialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Wood => "wood",
            MaterialKind::Metal => "metal",
            MaterialKind::Fabric => "fabric",
            MaterialKind::Leather => "leather",
            MaterialKind::Glass => "glass",
        }
    }

    /// Фиксированные константы материала
    pub fn props(&self) -> MaterialProps {
        let (roughness, metalness, opacity) = match self {
            MaterialKind::Wood => (0.8, 0.1, 1.0),
            MaterialKind::Metal => (0.3, 0.8, 1.0),
            MaterialKind::Fabric => (0.9, 0.0, 1.0),
            MaterialKind::Leather => (0.6, 0.1, 1.0),
            MaterialKind::Glass => (0.1, 0.0, 0.8),
        };
        MaterialProps {
            roughness,
            metalness,
            opacity,
            transparent: opacity < 1.0,
        }
    }

    pub fn all() -> &'static [MaterialKind] {
        &[
            MaterialKind::Wood,
            MaterialKind::Metal,
            MaterialKind::Fabric,
            MaterialKind::Leather,
            MaterialKind::Glass,
        ]
    }
}

impl From<String> for MaterialKind {
    /// Неизвестный материал заменяется деревом
    fn from(name: String) -> Self {
        match name.as_str() {
            "metal" => MaterialKind::Metal,
            "fabric" => MaterialKind::Fabric,
            "leather" => MaterialKind::Leather,
            "glass" => MaterialKind::Glass,
            _ => MaterialKind::Wood,
        }
    }
}

impl From<MaterialKind> for String {
    fn from(kind: MaterialKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Габариты мебели в метрах
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Footprint {
    /// Минимальный размер любой стороны
    pub const MIN_SIDE: f64 = 0.1;

    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self { width, height, depth }
    }

    /// Половина наибольшей горизонтальной стороны
    pub fn half_extent(&self) -> f64 {
        self.width.max(self.depth) / 2.0
    }

    pub fn is_valid(&self) -> bool {
        [self.width, self.height, self.depth]
            .iter()
            .all(|v| v.is_finite() && *v >= Self::MIN_SIDE)
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Экземпляр мебели в комнате.
///
/// Имена полей при сериализации совпадают с форматом внешнего хранилища
/// (`type`, `name`, `material`, `dimensions`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureInstance {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub kind: FurnitureKind,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(flatten)]
    pub transform: Transform,
    pub color: String,
    #[serde(rename = "material", default)]
    pub material_kind: MaterialKind,
    #[serde(rename = "dimensions", default)]
    pub footprint: Footprint,
}

impl FurnitureInstance {
    pub fn position(&self) -> [f64; 3] {
        self.transform.position
    }

    pub fn yaw(&self) -> f64 {
        self.transform.yaw()
    }
}

// ============================================================================
// Комната
// ============================================================================

/// Оболочка комнаты (метры)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomShell {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl RoomShell {
    /// Допустимый диапазон ширины и длины
    pub const FLOOR_RANGE: (f64, f64) = (2.0, 15.0);
    /// Допустимый диапазон высоты потолка
    pub const HEIGHT_RANGE: (f64, f64) = (2.0, 5.0);

    /// Проверенная оболочка: нечисловые и неположительные значения
    /// отклоняются, остальные зажимаются в допустимые диапазоны.
    pub fn validated(width: f64, length: f64, height: f64) -> Option<Self> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !(ok(width) && ok(length) && ok(height)) {
            return None;
        }
        let (fmin, fmax) = Self::FLOOR_RANGE;
        let (hmin, hmax) = Self::HEIGHT_RANGE;
        Some(Self {
            width: width.clamp(fmin, fmax),
            length: length.clamp(fmin, fmax),
            height: height.clamp(hmin, hmax),
        })
    }

    /// Соответствует ли оболочка инвариантам
    pub fn is_valid(&self) -> bool {
        Self::validated(self.width, self.length, self.height).as_ref() == Some(self)
    }
}

impl Default for RoomShell {
    fn default() -> Self {
        Self {
            width: 6.0,
            length: 8.0,
            height: 3.0,
        }
    }
}

/// Проект комнаты: оболочка и расставленная мебель
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDesign {
    /// Версия формата
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub name: String,
    pub room: RoomShell,
    #[serde(default)]
    pub furniture: Vec<FurnitureInstance>,
}

impl Default for RoomDesign {
    fn default() -> Self {
        Self {
            version: 1,
            name: "New Room Design".to_string(),
            room: RoomShell::default(),
            furniture: Vec::new(),
        }
    }
}
