//! Built-in furniture library
//!
//! Templates may leave any field out; `instantiate` fills structural defaults.

use serde::{Deserialize, Serialize};
use shared::{Footprint, FurnitureInstance, FurnitureKind, MaterialKind, Transform};

pub const DEFAULT_NAME: &str = "Furniture Item";
pub const DEFAULT_COLOR: &str = "#8B4513";

/// Add request coming from the furniture library
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FurnitureTemplate {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FurnitureKind>,
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "material", default, skip_serializing_if = "Option::is_none")]
    pub material_kind: Option<MaterialKind>,
    #[serde(rename = "dimensions", default, skip_serializing_if = "Option::is_none")]
    pub footprint: Option<Footprint>,
}

impl FurnitureTemplate {
    pub fn new(
        slug: &str,
        name: &str,
        color: &str,
        material: MaterialKind,
        width: f64,
        height: f64,
        depth: f64,
    ) -> Self {
        Self {
            kind: Some(FurnitureKind::from_slug(slug)),
            display_name: Some(name.to_string()),
            color: Some(color.to_string()),
            material_kind: Some(material),
            footprint: Some(Footprint::new(width, height, depth)),
        }
    }

    /// New instance with identity pose at the origin and a fresh id
    pub fn instantiate(&self) -> FurnitureInstance {
        let footprint = match self.footprint {
            Some(fp) if fp.is_valid() => fp,
            Some(fp) => {
                tracing::debug!("Template footprint {fp:?} is invalid, using default");
                Footprint::default()
            }
            None => Footprint::default(),
        };
        FurnitureInstance {
            id: uuid::Uuid::new_v4().to_string(),
            kind: self.kind.clone().unwrap_or(FurnitureKind::Generic),
            display_name: self
                .display_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            transform: Transform::new(),
            color: self
                .color
                .clone()
                .filter(|c| crate::validation::is_hex_color(c))
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            material_kind: self.material_kind.unwrap_or_default(),
            footprint,
        }
    }
}

/// Templates shown in the furniture library
pub fn builtin_catalog() -> Vec<FurnitureTemplate> {
    use MaterialKind::{Fabric, Leather, Wood};
    vec![
        FurnitureTemplate::new("chair", "Modern Chair", "#4A5568", Fabric, 0.6, 0.9, 0.6),
        FurnitureTemplate::new("sofa", "3-Seat Sofa", "#2D3748", Fabric, 2.2, 0.8, 0.9),
        FurnitureTemplate::new("armchair", "Armchair", "#8B4513", Leather, 0.8, 0.9, 0.8),
        FurnitureTemplate::new("coffee-table", "Coffee Table", "#8B4513", Wood, 1.2, 0.4, 0.6),
        FurnitureTemplate::new("dining-table", "Dining Table", "#654321", Wood, 1.8, 0.75, 0.9),
        FurnitureTemplate::new("side-table", "Side Table", "#D2691E", Wood, 0.5, 0.6, 0.5),
        FurnitureTemplate::new("bookshelf", "Bookshelf", "#8B4513", Wood, 0.8, 2.0, 0.3),
        FurnitureTemplate::new("wardrobe", "Wardrobe", "#A0522D", Wood, 1.2, 2.2, 0.6),
        FurnitureTemplate::new("dresser", "Dresser", "#CD853F", Wood, 1.0, 0.8, 0.5),
        FurnitureTemplate::new("bed", "Single Bed", "#F5F5DC", Fabric, 1.0, 0.6, 2.0),
        FurnitureTemplate::new("bed", "Double Bed", "#F5F5DC", Fabric, 1.4, 0.6, 2.0),
        FurnitureTemplate::new("nightstand", "Nightstand", "#8B4513", Wood, 0.4, 0.6, 0.4),
    ]
}

/// First catalog template of the given kind (aliases accepted)
pub fn find_template(slug: &str) -> Option<FurnitureTemplate> {
    let kind = FurnitureKind::from_slug(slug);
    builtin_catalog().into_iter().find(|t| t.kind.as_ref() == Some(&kind))
}
