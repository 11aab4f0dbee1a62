//! Furniture CRUD and property edits
//!
//! Every accepted edit is one history step. Invalid input (non-finite numbers,
//! undersized footprints, malformed colors) is ignored and the prior state kept.

use shared::{Footprint, FurnitureInstance, MaterialKind, ObjectId, RoomShell};

use crate::catalog::FurnitureTemplate;
use crate::validation::is_hex_color;

use super::RoomSession;

/// Floor offset applied to duplicates so they don't hide the original
const DUPLICATE_OFFSET: f64 = 0.5;

impl RoomSession {
    /// Instantiate a library template at the origin and select it
    pub fn add_furniture(&mut self, template: &FurnitureTemplate) -> ObjectId {
        self.add_instance(template.instantiate())
    }

    /// Append an instance and select it. A clashing id is replaced with a fresh one.
    pub fn add_instance(&mut self, mut instance: FurnitureInstance) -> ObjectId {
        if instance.id.is_empty() || self.get(&instance.id).is_some() {
            instance.id = uuid::Uuid::new_v4().to_string();
        }
        let id = instance.id.clone();
        tracing::info!("Added {} '{}' ({id})", instance.kind.as_str(), instance.display_name);

        self.design.furniture.push(instance);
        self.selected = Some(id.clone());
        self.commit();
        id
    }

    /// Remove an instance; clears the selection if it pointed at it
    pub fn delete_furniture(&mut self, id: &str) -> bool {
        let before = self.design.furniture.len();
        self.design.furniture.retain(|f| f.id != id);
        if self.design.furniture.len() == before {
            return false;
        }
        if self.is_selected(id) {
            self.selected = None;
        }
        tracing::info!("Deleted furniture {id}");
        self.commit();
        true
    }

    /// Copy an instance with a fresh id, shifted on the floor, and select the copy
    pub fn duplicate_furniture(&mut self, id: &str) -> Option<ObjectId> {
        let mut copy = self.get(id)?.clone();
        copy.id = uuid::Uuid::new_v4().to_string();
        copy.transform.position[0] += DUPLICATE_OFFSET;
        copy.transform.position[2] += DUPLICATE_OFFSET;
        Some(self.add_instance(copy))
    }

    fn edit_instance(&mut self, id: &str, what: &str, edit: impl FnOnce(&mut FurnitureInstance) -> bool) -> bool {
        let Some(instance) = self.get_mut(id) else {
            return false;
        };
        if !edit(instance) {
            tracing::debug!("Rejected {what} edit for {id}");
            return false;
        }
        self.commit();
        true
    }

    pub fn rename_furniture(&mut self, id: &str, name: &str) -> bool {
        let name = name.trim();
        self.edit_instance(id, "name", |f| {
            if name.is_empty() {
                return false;
            }
            f.display_name = name.to_string();
            true
        })
    }

    pub fn set_color(&mut self, id: &str, color: &str) -> bool {
        self.edit_instance(id, "color", |f| {
            if !is_hex_color(color) {
                return false;
            }
            f.color = color.to_string();
            true
        })
    }

    pub fn set_material(&mut self, id: &str, material: MaterialKind) -> bool {
        self.edit_instance(id, "material", |f| {
            f.material_kind = material;
            true
        })
    }

    pub fn set_footprint(&mut self, id: &str, footprint: Footprint) -> bool {
        self.edit_instance(id, "footprint", |f| {
            if !footprint.is_valid() {
                return false;
            }
            f.footprint = footprint;
            true
        })
    }

    /// Set yaw in radians
    pub fn set_yaw(&mut self, id: &str, yaw: f64) -> bool {
        self.edit_instance(id, "yaw", |f| {
            if !yaw.is_finite() {
                return false;
            }
            f.transform.rotation[1] = yaw;
            true
        })
    }

    /// Set the floor position; height stays 0
    pub fn set_floor_position(&mut self, id: &str, x: f64, z: f64) -> bool {
        self.edit_instance(id, "position", |f| {
            if !(x.is_finite() && z.is_finite()) {
                return false;
            }
            f.transform.position = [x, 0.0, z];
            true
        })
    }

    pub fn set_scale(&mut self, id: &str, scale: [f64; 3]) -> bool {
        self.edit_instance(id, "scale", |f| {
            if !scale.iter().all(|s| s.is_finite() && *s > 0.0) {
                return false;
            }
            f.transform.scale = scale;
            true
        })
    }

    /// Replace the room shell. Furniture outside the new bounds is left where
    /// it is and re-clamped on its next drag.
    pub fn set_room(&mut self, width: f64, length: f64, height: f64) -> bool {
        let Some(room) = RoomShell::validated(width, length, height) else {
            tracing::debug!("Rejected room shell {width} x {length} x {height}");
            return false;
        };
        if room == self.design.room {
            return false;
        }
        self.design.room = room;
        self.commit();
        true
    }
}
