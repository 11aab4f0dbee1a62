//! Room authoring session
//!
//! Owns the room design (shell + furniture), the single selection and the
//! undo/redo history. Pointer routing lives in `viewport`; this module only
//! exposes the mutations it needs.

mod floor_plan;
mod furniture_ops;
mod persistence;

pub use floor_plan::auto_furniture_for;

use shared::{FurnitureInstance, ObjectId, RoomDesign};

use super::history::History;

/// Room design with selection and undo/redo history
pub struct RoomSession {
    /// Current design
    pub design: RoomDesign,
    history: History<RoomDesign>,
    selected: Option<ObjectId>,
    /// Monotonically increasing version counter for cache invalidation
    version: u64,
}

impl RoomSession {
    pub fn new(design: RoomDesign) -> Self {
        Self::with_history_limit(design, History::<RoomDesign>::DEFAULT_LIMIT)
    }

    pub fn with_history_limit(design: RoomDesign, limit: usize) -> Self {
        Self {
            history: History::with_limit(design.clone(), limit),
            design,
            selected: None,
            version: 0,
        }
    }

    /// Current design version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn furniture(&self) -> &[FurnitureInstance] {
        &self.design.furniture
    }

    pub fn get(&self, id: &str) -> Option<&FurnitureInstance> {
        self.design.furniture.iter().find(|f| f.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut FurnitureInstance> {
        self.design.furniture.iter_mut().find(|f| f.id == id)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn selected(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    pub fn selected_instance(&self) -> Option<&FurnitureInstance> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Select an existing instance. Returns the previously selected id when
    /// the selection actually moved to a different instance.
    pub fn select(&mut self, id: &str) -> Option<ObjectId> {
        if self.get(id).is_none() {
            tracing::debug!("Select ignored, no furniture with id {id}");
            return None;
        }
        if self.is_selected(id) {
            return None;
        }
        self.version += 1;
        self.selected.replace(id.to_string())
    }

    pub fn clear_selection(&mut self) -> Option<ObjectId> {
        let prev = self.selected.take();
        if prev.is_some() {
            self.version += 1;
        }
        prev
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Bump version without touching history (intermediate drag frames)
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }

    /// Record the current design as one undo step
    pub fn commit(&mut self) {
        self.history.commit(&self.design);
        self.version += 1;
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(prev) => {
                self.design = prev.clone();
                self.after_restore();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(next) => {
                self.design = next.clone();
                self.after_restore();
                true
            }
            None => false,
        }
    }

    fn after_restore(&mut self) {
        if let Some(id) = self.selected.as_deref() {
            if self.get(id).is_none() {
                self.selected = None;
            }
        }
        self.version += 1;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Replace the whole design and start a fresh history from it
    pub fn replace_design(&mut self, design: RoomDesign) {
        self.history.reset(design.clone());
        self.design = design;
        self.selected = None;
        self.version += 1;
    }
}

impl Default for RoomSession {
    fn default() -> Self {
        Self::new(RoomDesign::default())
    }
}
