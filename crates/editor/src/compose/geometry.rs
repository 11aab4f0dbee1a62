//! Procedural furniture geometry.
//!
//! Every archetype is assembled from primitive solids whose sizes and offsets
//! are proportional to the instance footprint. Offsets are in the instance's
//! local frame with the floor at y = 0.

use glam::DVec3;
use shared::{Footprint, FurnitureKind};

/// Primitive solid, centered on its offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solid {
    Box { width: f64, height: f64, depth: f64 },
    /// Frustum along Y; equal radii give a cylinder
    Cylinder { radius_top: f64, radius_bottom: f64, height: f64 },
    /// Cone along Y with the apex up
    Cone { radius: f64, height: f64 },
    Sphere { radius: f64 },
}

/// Surface of a part
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Finish {
    /// Instance color and material
    Body,
    /// Fixed color, instance material
    Accent(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidPart {
    pub solid: Solid,
    pub offset: DVec3,
    pub finish: Finish,
}

/// Builds the parts of one archetype for a footprint
pub type GeometryBuilder = fn(&Footprint) -> Vec<SolidPart>;

fn part(solid: Solid, x: f64, y: f64, z: f64) -> SolidPart {
    SolidPart {
        solid,
        offset: DVec3::new(x, y, z),
        finish: Finish::Body,
    }
}

fn accent(solid: Solid, x: f64, y: f64, z: f64, color: &'static str) -> SolidPart {
    SolidPart {
        finish: Finish::Accent(color),
        ..part(solid, x, y, z)
    }
}

fn cuboid(width: f64, height: f64, depth: f64) -> Solid {
    Solid::Box { width, height, depth }
}

fn cylinder(radius: f64, height: f64) -> Solid {
    Solid::Cylinder {
        radius_top: radius,
        radius_bottom: radius,
        height,
    }
}

fn frustum(radius_top: f64, radius_bottom: f64, height: f64) -> Solid {
    Solid::Cylinder {
        radius_top,
        radius_bottom,
        height,
    }
}

/// Kind → builder registry. Kinds missing here render the footprint box.
pub static GEOMETRY_REGISTRY: &[(FurnitureKind, GeometryBuilder)] = &[
    (FurnitureKind::Chair, chair),
    (FurnitureKind::DiningChair, chair),
    (FurnitureKind::Armchair, chair),
    (FurnitureKind::OfficeChair, office_chair),
    (FurnitureKind::Sofa, sofa),
    (FurnitureKind::Loveseat, loveseat),
    (FurnitureKind::LShapedSectional, l_sectional),
    (FurnitureKind::CoffeeTable, table),
    (FurnitureKind::DiningTable, table),
    (FurnitureKind::RoundDiningTable, round_table),
    (FurnitureKind::ExtendableDiningTable, extendable_table),
    (FurnitureKind::SideTable, side_table),
    (FurnitureKind::Nightstand, side_table),
    (FurnitureKind::Dresser, side_table),
    (FurnitureKind::Bed, bed),
    (FurnitureKind::Bookshelf, bookshelf),
    (FurnitureKind::Wardrobe, wardrobe),
    (FurnitureKind::Refrigerator, refrigerator),
    (FurnitureKind::Stove, stove),
    (FurnitureKind::Bathtub, bathtub),
    (FurnitureKind::FloorLamp, floor_lamp),
    (FurnitureKind::TableLamp, table_lamp),
];

/// Builder for a kind; None means "render the footprint box"
pub fn geometry_builder(kind: &FurnitureKind) -> Option<GeometryBuilder> {
    let found = GEOMETRY_REGISTRY
        .iter()
        .find(|(k, _)| k == kind)
        .map(|(_, builder)| *builder);
    if found.is_none() {
        if let FurnitureKind::Other(slug) = kind {
            tracing::debug!("No geometry for furniture kind '{slug}', using box");
        }
    }
    found
}

/// Parts for a kind, falling back to one footprint-sized box
pub fn build_parts(kind: &FurnitureKind, fp: &Footprint) -> Vec<SolidPart> {
    match geometry_builder(kind) {
        Some(builder) => builder(fp),
        None => fallback_box(fp),
    }
}

pub fn fallback_box(fp: &Footprint) -> Vec<SolidPart> {
    vec![part(cuboid(fp.width, fp.height, fp.depth), 0.0, fp.height * 0.5, 0.0)]
}

// ── Seating ──────────────────────────────────────────────────

fn chair(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    let mut parts = vec![
        part(cuboid(w * 0.85, h * 0.08, d * 0.85), 0.0, h * 0.45, 0.0),
        accent(cuboid(w * 0.8, h * 0.06, d * 0.8), 0.0, h * 0.52, 0.0, "#F0F0F0"),
        part(cuboid(w * 0.8, h * 0.5, d * 0.08), 0.0, h * 0.75, -d * 0.35),
    ];
    for (sx, sz) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        parts.push(accent(cylinder(0.025, h * 0.44), sx * w * 0.35, h * 0.22, sz * d * 0.35, "#654321"));
    }
    parts
}

fn office_chair(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    vec![
        accent(cylinder(w * 0.4, 0.1), 0.0, 0.05, 0.0, "#2F2F2F"),
        accent(cylinder(0.04, h * 0.5), 0.0, h * 0.3, 0.0, "#C0C0C0"),
        part(cylinder(w * 0.35, h * 0.1), 0.0, h * 0.55, 0.0),
        part(cuboid(w * 0.6, h * 0.4, d * 0.1), 0.0, h * 0.8, -d * 0.2),
    ]
}

fn sofa(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    vec![
        part(cuboid(w * 0.9, h * 0.2, d * 0.8), 0.0, h * 0.5, 0.0),
        part(cuboid(w, h * 0.3, d), 0.0, h * 0.3, 0.0),
        part(cuboid(w * 0.8, h * 0.4, d * 0.2), 0.0, h * 0.75, -d * 0.35),
        part(cuboid(w * 0.1, h * 0.4, d * 0.8), -w * 0.45, h * 0.65, 0.0),
        part(cuboid(w * 0.1, h * 0.4, d * 0.8), w * 0.45, h * 0.65, 0.0),
    ]
}

fn loveseat(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    let mut parts = vec![accent(cuboid(w, h * 0.3, d), 0.0, h * 0.2, 0.0, "#654321")];
    for sx in [-1.0, 1.0] {
        parts.push(part(cuboid(w * 0.35, h * 0.15, d * 0.7), sx * w * 0.2, h * 0.5, 0.0));
        parts.push(part(cuboid(w * 0.3, h * 0.3, d * 0.15), sx * w * 0.2, h * 0.75, -d * 0.3));
        parts.push(part(cuboid(w * 0.1, h * 0.4, d * 0.8), sx * w * 0.45, h * 0.6, 0.0));
    }
    parts
}

fn l_sectional(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    vec![
        part(cuboid(w * 0.6, h * 0.4, d), -w * 0.2, h * 0.4, 0.0),
        part(cuboid(w * 0.4, h * 0.4, d * 0.6), w * 0.2, h * 0.4, d * 0.2),
        part(cuboid(w * 0.25, h * 0.1, d * 0.7), -w * 0.35, h * 0.65, 0.0),
        part(cuboid(w * 0.25, h * 0.1, d * 0.7), -w * 0.05, h * 0.65, 0.0),
        part(cuboid(w * 0.35, h * 0.1, d * 0.25), w * 0.2, h * 0.65, d * 0.1),
        part(cuboid(w * 0.35, h * 0.1, d * 0.25), w * 0.2, h * 0.65, d * 0.35),
        part(cuboid(w * 0.6, h * 0.3, d * 0.1), -w * 0.2, h * 0.85, -d * 0.35),
        part(cuboid(w * 0.1, h * 0.3, d * 0.6), w * 0.35, h * 0.85, d * 0.2),
    ]
}

// ── Tables ───────────────────────────────────────────────────

fn table(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    let leg = (h - 0.08).max(0.01);
    let mut parts = vec![part(cuboid(w, 0.08, d), 0.0, h - 0.04, 0.0)];
    for (sx, sz) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        parts.push(part(cylinder(0.04, leg), sx * w * 0.4, leg * 0.5, sz * d * 0.4));
    }
    parts
}

fn round_table(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h) = (fp.width, fp.height);
    let stem = (h - 0.1).max(0.01);
    vec![
        part(cylinder(w * 0.5, 0.1), 0.0, h - 0.05, 0.0),
        part(frustum(w * 0.15, w * 0.25, stem), 0.0, stem * 0.5, 0.0),
    ]
}

fn extendable_table(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    let leg = (h - 0.1).max(0.01);
    let mut parts = vec![
        part(cuboid(w * 0.7, 0.1, d), 0.0, h - 0.05, 0.0),
        part(cuboid(w * 0.2, 0.1, d), -w * 0.4, h - 0.05, 0.0),
        part(cuboid(w * 0.2, 0.1, d), w * 0.4, h - 0.05, 0.0),
    ];
    for (sx, sz) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        parts.push(part(cuboid(0.08, leg, 0.08), sx * w * 0.3, leg * 0.5, sz * d * 0.4));
    }
    parts
}

fn side_table(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    let mut parts = vec![
        part(cuboid(w, 0.06, d), 0.0, h - 0.03, 0.0),
        part(cuboid(w * 0.9, h * 0.25, d * 0.1), 0.0, h * 0.7, d * 0.35),
    ];
    for (sx, sz) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        parts.push(part(cuboid(0.06, h * 0.7, 0.06), sx * w * 0.4, h * 0.35, sz * d * 0.4));
    }
    parts
}

// ── Bedroom & storage ────────────────────────────────────────

fn bed(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    vec![
        accent(cuboid(w + 0.1, h * 0.2, d + 0.1), 0.0, h * 0.3, 0.0, "#654321"),
        accent(cuboid(w, h * 0.2, d), 0.0, h * 0.5, 0.0, "#F5F5DC"),
        accent(cuboid(w, h * 0.8, 0.1), 0.0, h * 0.9, -d * 0.55, "#8B4513"),
        accent(cuboid(w * 0.35, h * 0.15, d * 0.25), -w * 0.25, h * 0.65, -d * 0.35, "#FFFFFF"),
        accent(cuboid(w * 0.35, h * 0.15, d * 0.25), w * 0.25, h * 0.65, -d * 0.35, "#FFFFFF"),
        accent(cuboid(w * 0.9, h * 0.08, d * 0.6), 0.0, h * 0.62, d * 0.1, "#4A90E2"),
    ]
}

fn bookshelf(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    let mut parts = vec![part(cuboid(w, h, d), 0.0, h * 0.5, 0.0)];
    let shelves = (h / 0.4).floor() as usize + 1;
    for i in 0..shelves {
        let y = i as f64 * 0.4 + 0.1;
        if y < h {
            parts.push(part(cuboid(w * 0.95, 0.03, d * 0.8), 0.0, y, d * 0.4));
        }
    }
    parts
}

fn wardrobe(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    vec![
        part(cuboid(w, h, d), 0.0, h * 0.5, 0.0),
        part(cuboid(w * 0.45, h * 0.9, 0.04), -w * 0.25, h * 0.5, d * 0.48),
        part(cuboid(w * 0.45, h * 0.9, 0.04), w * 0.25, h * 0.5, d * 0.48),
        accent(cylinder(0.02, 0.08), -w * 0.15, h * 0.6, d * 0.52, "#B8860B"),
        accent(cylinder(0.02, 0.08), w * 0.15, h * 0.6, d * 0.52, "#B8860B"),
    ]
}

// ── Appliances & fixtures ────────────────────────────────────

fn refrigerator(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    vec![
        accent(cuboid(w, h, d), 0.0, h * 0.5, 0.0, "#E8E8E8"),
        accent(cuboid(w * 0.1, h * 0.45, 0.02), w * 0.45, h * 0.75, d * 0.01, "#D0D0D0"),
        accent(cuboid(w * 0.1, h * 0.45, 0.02), w * 0.45, h * 0.25, d * 0.01, "#D0D0D0"),
    ]
}

fn stove(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    vec![
        accent(cuboid(w, h, d), 0.0, h * 0.5, 0.0, "#2F2F2F"),
        accent(cuboid(w * 0.95, 0.02, d * 0.95), 0.0, h + 0.01, 0.0, "#1A1A1A"),
        accent(cuboid(w * 0.8, h * 0.4, 0.05), 0.0, h * 0.3, d * 0.45, "#1F1F1F"),
    ]
}

fn bathtub(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h, d) = (fp.width, fp.height, fp.depth);
    vec![
        accent(cuboid(w, h * 0.4, d), 0.0, h * 0.3, 0.0, "#FFFFFF"),
        accent(cuboid(w * 0.9, h * 0.3, d * 0.9), 0.0, h * 0.4, 0.0, "#F8F8FF"),
        accent(cuboid(w + 0.1, h * 0.05, d + 0.1), 0.0, h * 0.6, 0.0, "#FFFFFF"),
    ]
}

// ── Lighting ─────────────────────────────────────────────────

fn floor_lamp(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h) = (fp.width, fp.height);
    vec![
        part(frustum(w * 0.3, w * 0.4, h * 0.1), 0.0, h * 0.05, 0.0),
        part(cylinder(0.02, h * 0.8), 0.0, h * 0.5, 0.0),
        accent(Solid::Cone { radius: w * 0.4, height: h * 0.25 }, 0.0, h * 0.85, 0.0, "#FFF8DC"),
    ]
}

fn table_lamp(fp: &Footprint) -> Vec<SolidPart> {
    let (w, h) = (fp.width, fp.height);
    vec![
        part(frustum(w * 0.25, w * 0.3, h * 0.3), 0.0, h * 0.15, 0.0),
        part(cylinder(0.015, h * 0.4), 0.0, h * 0.5, 0.0),
        accent(Solid::Cone { radius: w * 0.3, height: h * 0.2 }, 0.0, h * 0.8, 0.0, "#FFF8DC"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_named_kind_has_a_builder() {
        for slug in [
            "chair", "dining-chair", "office-chair", "armchair", "sofa", "loveseat",
            "l-shaped-sectional", "coffee-table", "dining-table", "round-dining-table",
            "extendable-dining-table", "side-table", "nightstand", "bed", "dresser",
            "bookshelf", "wardrobe", "refrigerator", "stove", "bathtub", "floor-lamp",
            "table-lamp",
        ] {
            let kind = FurnitureKind::from_slug(slug);
            assert!(geometry_builder(&kind).is_some(), "{slug}");
        }
    }

    #[test]
    fn test_registry_has_one_entry_per_kind() {
        for (i, (kind, _)) in GEOMETRY_REGISTRY.iter().enumerate() {
            assert!(!matches!(kind, FurnitureKind::Generic | FurnitureKind::Other(_)));
            assert!(GEOMETRY_REGISTRY[i + 1..].iter().all(|(k, _)| k != kind), "{kind:?}");
        }
        assert!(geometry_builder(&FurnitureKind::Generic).is_none());
    }

    #[test]
    fn test_unknown_kind_degrades_to_footprint_box() {
        let fp = Footprint::new(1.5, 0.7, 0.4);
        let parts = build_parts(&FurnitureKind::Other("hammock".into()), &fp);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].solid, cuboid(1.5, 0.7, 0.4));
        assert_eq!(parts[0].offset, DVec3::new(0.0, 0.35, 0.0));
        assert_eq!(parts[0].finish, Finish::Body);
    }

    #[test]
    fn test_parts_scale_with_footprint() {
        let small = build_parts(&FurnitureKind::Sofa, &Footprint::new(1.0, 1.0, 1.0));
        let large = build_parts(&FurnitureKind::Sofa, &Footprint::new(2.0, 1.0, 1.0));
        assert_eq!(small.len(), large.len());
        let Solid::Box { width: ws, .. } = small[1].solid else { panic!("sofa base is a box") };
        let Solid::Box { width: wl, .. } = large[1].solid else { panic!("sofa base is a box") };
        assert_eq!(wl, 2.0 * ws);
    }

    #[test]
    fn test_chair_has_seat_back_and_four_legs() {
        let parts = build_parts(&FurnitureKind::Chair, &Footprint::new(0.6, 0.9, 0.6));
        let legs = parts
            .iter()
            .filter(|p| p.finish == Finish::Accent("#654321"))
            .count();
        assert_eq!(legs, 4);
        assert_eq!(parts.len(), 7);
    }
}
