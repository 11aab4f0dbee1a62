//! Per-object pointer state machine: translate on the floor or spin around Y.

use glam::{DVec2, DVec3};
use shared::{Footprint, FurnitureInstance, ObjectId, RoomShell};

use crate::state::room::RoomSession;
use crate::state::settings::InteractionSettings;

use super::drag_signal::SharedDragSignal;
use super::picking::{ray_ground, Ray};

/// One pointer event as seen by the room view
#[derive(Debug, Clone, Copy)]
pub struct PointerSample {
    /// Ray through the pointer from the current camera
    pub ray: Ray,
    /// Pointer in normalized device coordinates
    pub ndc: DVec2,
    /// Shift modifier held
    pub shift: bool,
}

impl PointerSample {
    pub fn ground_hit(&self) -> Option<DVec3> {
        ray_ground(&self.ray)
    }
}

/// Drag state of a single furniture instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMode {
    Idle,
    /// Floor-plane drag; `anchor_offset` is (position − ground hit) in x/z
    Translating { anchor_offset: DVec2 },
    /// Yaw drag; tracks the last pointer x in NDC
    Rotating { last_ndc_x: f64 },
}

/// Keep-out distance from the walls for an object of this footprint
pub fn drag_margin(footprint: &Footprint, clearance: f64) -> f64 {
    footprint.half_extent() + clearance
}

/// Clamp a floor position (x, z) into the room, leaving `drag_margin` to each wall.
/// An axis with no legal range (object wider than the room) is pinned to 0.
pub fn clamp_to_room(candidate: DVec2, footprint: &Footprint, room: &RoomShell, clearance: f64) -> DVec2 {
    let margin = drag_margin(footprint, clearance);
    let axis = |value: f64, dim: f64| {
        let lo = -dim / 2.0 + margin;
        let hi = dim / 2.0 - margin;
        if lo > hi {
            0.0
        } else {
            value.clamp(lo, hi)
        }
    };
    DVec2::new(axis(candidate.x, room.width), axis(candidate.y, room.length))
}

/// Pointer controller bound to one furniture instance
pub struct FurnitureController {
    id: ObjectId,
    mode: DragMode,
    /// Something changed since pointer-down
    dirty: bool,
    rotation_speed: f64,
    clearance: f64,
    signal: SharedDragSignal,
}

impl FurnitureController {
    pub fn new(id: ObjectId, signal: SharedDragSignal, settings: &InteractionSettings) -> Self {
        Self {
            id,
            mode: DragMode::Idle,
            dirty: false,
            rotation_speed: settings.rotation_speed,
            clearance: settings.wall_clearance,
            signal,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == DragMode::Idle
    }

    /// Start a drag on this instance and select it.
    /// Shift starts a rotation, anything else a translation.
    pub fn pointer_down(&mut self, session: &mut RoomSession, input: &PointerSample) -> bool {
        let Some(instance) = session.get(&self.id) else {
            return false;
        };

        self.mode = if input.shift {
            DragMode::Rotating {
                last_ndc_x: input.ndc.x,
            }
        } else {
            DragMode::Translating {
                anchor_offset: anchor_offset(instance, input),
            }
        };
        self.dirty = false;

        self.signal.borrow_mut().drag_started(&self.id);
        session.select(&self.id);
        true
    }

    /// Apply a pointer move. Returns true when the instance changed.
    pub fn pointer_move(&mut self, session: &mut RoomSession, input: &PointerSample) -> bool {
        if self.mode == DragMode::Idle || !session.is_selected(&self.id) {
            return false;
        }
        let room = session.design.room;
        let (rotation_speed, clearance) = (self.rotation_speed, self.clearance);

        let Some(instance) = session.get_mut(&self.id) else {
            return false;
        };

        let changed = match &mut self.mode {
            DragMode::Idle => false,
            DragMode::Translating { anchor_offset } => {
                let Some(hit) = input.ground_hit() else {
                    tracing::debug!("Pointer ray misses the floor, move ignored");
                    return false;
                };
                let candidate = DVec2::new(hit.x, hit.z) + *anchor_offset;
                let clamped = clamp_to_room(candidate, &instance.footprint, &room, clearance);
                let next = [clamped.x, 0.0, clamped.y];
                let moved = instance.transform.position != next;
                instance.transform.position = next;
                moved
            }
            DragMode::Rotating { last_ndc_x } => {
                let delta = input.ndc.x - *last_ndc_x;
                if !delta.is_finite() {
                    return false;
                }
                *last_ndc_x = input.ndc.x;
                instance.transform.rotation[1] += delta * rotation_speed;
                delta != 0.0
            }
        };

        if changed {
            self.dirty = true;
            session.notify_mutated();
        }
        changed
    }

    /// Finish the drag. Commits the result to history once if anything moved.
    pub fn pointer_up(&mut self, session: &mut RoomSession) -> bool {
        if self.mode == DragMode::Idle {
            return false;
        }
        self.mode = DragMode::Idle;
        self.signal.borrow_mut().drag_ended(&self.id);
        if std::mem::take(&mut self.dirty) {
            session.commit();
        }
        true
    }
}

fn anchor_offset(instance: &FurnitureInstance, input: &PointerSample) -> DVec2 {
    let [x, _, z] = instance.position();
    match input.ground_hit() {
        Some(hit) => DVec2::new(x - hit.x, z - hit.z),
        None => {
            tracing::debug!("No floor hit at pointer-down for {}, anchoring at pointer", instance.id);
            DVec2::ZERO
        }
    }
}
