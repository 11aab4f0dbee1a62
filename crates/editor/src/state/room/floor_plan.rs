//! Applying the "2D → 3D" wizard result to a room

use shared::{
    FloorPlanImport, Footprint, FurnitureInstance, FurnitureKind, MaterialKind, PlanRoom,
    PlanRoomKind, RoomShell, Transform,
};

use super::RoomSession;

/// Furniture auto-placed for one plan room, if its kind gets any
pub fn auto_furniture_for(room: &PlanRoom, index: usize) -> Option<FurnitureInstance> {
    let (cx, cy) = room.bounds.center();
    let (slug, kind, name, x, color, material, footprint) = match room.kind {
        PlanRoomKind::Living => (
            "sofa",
            FurnitureKind::Sofa,
            "Auto-placed Sofa",
            cx - 1.0,
            "#2D3748",
            MaterialKind::Fabric,
            Footprint::new(2.2, 0.8, 0.9),
        ),
        PlanRoomKind::Bedroom => (
            "bed",
            FurnitureKind::Bed,
            "Auto-placed Bed",
            cx,
            "#F5F5DC",
            MaterialKind::Fabric,
            Footprint::new(1.6, 0.6, 2.0),
        ),
        PlanRoomKind::Kitchen => (
            "table",
            FurnitureKind::DiningTable,
            "Auto-placed Dining Table",
            cx,
            "#654321",
            MaterialKind::Wood,
            Footprint::new(1.8, 0.75, 0.9),
        ),
        PlanRoomKind::Bathroom
        | PlanRoomKind::Dining
        | PlanRoomKind::Office
        | PlanRoomKind::Guest
        | PlanRoomKind::Utility => return None,
    };

    Some(FurnitureInstance {
        id: format!("auto-{slug}-{index}"),
        kind,
        display_name: name.to_string(),
        transform: Transform::on_floor(x, cy),
        color: color.to_string(),
        material_kind: material,
        footprint,
    })
}

impl RoomSession {
    /// Replace the room shell from a floor plan and auto-place furniture.
    ///
    /// Dimensions are meters, clamped into the shell ranges. When the plan
    /// lists rooms, the generated furniture replaces the current collection.
    /// One history step. Returns the number of auto-placed instances.
    pub fn apply_floor_plan(&mut self, plan: &FloorPlanImport) -> Result<usize, String> {
        let dims = plan.dimensions;
        let room = RoomShell::validated(dims.width, dims.length, dims.height).ok_or_else(|| {
            format!(
                "Invalid floor plan dimensions: {} x {} x {}",
                dims.width, dims.length, dims.height
            )
        })?;

        self.design.room = room;

        let mut placed = 0;
        if !plan.rooms.is_empty() {
            let furniture: Vec<FurnitureInstance> = plan
                .rooms
                .iter()
                .enumerate()
                .filter_map(|(i, r)| auto_furniture_for(r, i))
                .collect();
            placed = furniture.len();
            self.design.furniture = furniture;
            self.selected = None;
        }

        tracing::info!(
            "Imported floor plan {:.1} x {:.1} m with {} rooms, {placed} items placed",
            room.width,
            room.length,
            plan.rooms.len()
        );
        self.commit();
        Ok(placed)
    }
}
