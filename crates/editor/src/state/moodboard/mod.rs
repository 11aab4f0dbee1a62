//! Moodboard canvas session
//!
//! Elements, single selection, zoom and the undo/redo history. Drag,
//! transform, layer and library operations are split into submodules the
//! same way the room session splits its ops.

mod drag;
mod layers;
mod library;
mod persistence;
mod transform;

pub use library::{generate_elements, STYLE_PALETTES, SWATCH_PALETTE};
pub use transform::NodeTransform;

use shared::{MoodboardDocument, MoodboardElement, ObjectId};

use super::history::History;
use super::settings::CanvasSettings;

/// Moodboard elements with selection, zoom and history
pub struct MoodboardSession {
    pub name: String,
    elements: Vec<MoodboardElement>,
    history: History<Vec<MoodboardElement>>,
    selected: Option<ObjectId>,
    zoom: f64,
    canvas: CanvasSettings,
    /// Next swatch color from `SWATCH_PALETTE`
    palette_cursor: usize,
    /// Live (uncommitted) transformer state of the element being resized
    live_transform: Option<(ObjectId, NodeTransform)>,
    version: u64,
}

impl MoodboardSession {
    pub fn new(doc: MoodboardDocument) -> Self {
        Self::with_settings(doc, CanvasSettings::default(), History::<Vec<MoodboardElement>>::DEFAULT_LIMIT)
    }

    pub fn with_settings(doc: MoodboardDocument, canvas: CanvasSettings, history_limit: usize) -> Self {
        Self {
            name: doc.name,
            history: History::with_limit(doc.elements.clone(), history_limit),
            elements: doc.elements,
            selected: None,
            zoom: 1.0,
            canvas,
            palette_cursor: 0,
            live_transform: None,
            version: 0,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Elements in storage order
    pub fn elements(&self) -> &[MoodboardElement] {
        &self.elements
    }

    pub fn get(&self, id: &str) -> Option<&MoodboardElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut MoodboardElement> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn document(&self) -> MoodboardDocument {
        MoodboardDocument {
            version: 1,
            name: self.name.clone(),
            elements: self.elements.clone(),
        }
    }

    /// Storage indices sorted by ascending zIndex; ties keep storage order
    fn sorted_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.elements.len()).collect();
        order.sort_by_key(|&i| self.elements[i].z_index());
        order
    }

    /// Elements in paint order (bottom first)
    pub fn paint_order(&self) -> Vec<&MoodboardElement> {
        self.sorted_indices()
            .into_iter()
            .map(|i| &self.elements[i])
            .collect()
    }

    // ========================================================================
    // Selection and hit testing
    // ========================================================================

    pub fn selected(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    pub fn selected_element(&self) -> Option<&MoodboardElement> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            tracing::debug!("Select ignored, no element with id {id}");
            return false;
        }
        if !self.is_selected(id) {
            self.selected = Some(id.to_string());
            self.version += 1;
        }
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.version += 1;
        }
    }

    /// Top-most element under a canvas point (stage coordinates divided by zoom)
    pub fn element_at(&self, x: f64, y: f64) -> Option<&MoodboardElement> {
        self.sorted_indices()
            .into_iter()
            .rev()
            .map(|i| &self.elements[i])
            .find(|el| contains_point(el, x, y))
    }

    /// Pointer press on the stage: selects the element under it, or clears the
    /// selection on empty background. Coordinates are in stage pixels.
    pub fn pointer_down(&mut self, stage_x: f64, stage_y: f64) -> Option<ObjectId> {
        let (x, y) = self.stage_to_canvas(stage_x, stage_y);
        match self.element_at(x, y).map(|el| el.id().clone()) {
            Some(id) => {
                self.select(&id);
                Some(id)
            }
            None => {
                self.clear_selection();
                None
            }
        }
    }

    // ========================================================================
    // Zoom
    // ========================================================================

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.clamp(self.canvas.min_zoom, self.canvas.max_zoom);
        self.version += 1;
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.canvas.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.canvas.zoom_step);
    }

    pub fn stage_to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
        (x / self.zoom, y / self.zoom)
    }

    pub fn canvas_settings(&self) -> &CanvasSettings {
        &self.canvas
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Record the elements. Snapshots never carry a drag flag.
    fn commit(&mut self) {
        let mut snapshot = self.elements.clone();
        for el in &mut snapshot {
            el.frame.is_dragging = false;
        }
        self.history.commit(&snapshot);
        self.version += 1;
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(prev) => {
                self.elements = prev.clone();
                self.after_restore();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(next) => {
                self.elements = next.clone();
                self.after_restore();
                true
            }
            None => false,
        }
    }

    fn after_restore(&mut self) {
        self.live_transform = None;
        for el in &mut self.elements {
            el.frame.is_dragging = false;
        }
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

    /// Replace all elements and start a fresh history from them
    pub fn replace_document(&mut self, doc: MoodboardDocument) {
        self.history.reset(doc.elements.clone());
        self.elements = doc.elements;
        self.name = doc.name;
        self.selected = None;
        self.live_transform = None;
        self.version += 1;
    }
}

impl Default for MoodboardSession {
    fn default() -> Self {
        Self::new(MoodboardDocument::default())
    }
}

/// Point-in-element test honoring rotation (degrees, about the top-left corner)
fn contains_point(el: &MoodboardElement, x: f64, y: f64) -> bool {
    let f = &el.frame;
    let (sin, cos) = (-f.rotation.to_radians()).sin_cos();
    let (dx, dy) = (x - f.x, y - f.y);
    let lx = dx * cos - dy * sin;
    let ly = dx * sin + dy * cos;
    (0.0..=f.width).contains(&lx) && (0.0..=f.height).contains(&ly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_paint_order_ascending_z() {
        let s = fixtures::moodboard_with(vec![
            fixtures::swatch("top", 0.0, 0.0, 3),
            fixtures::swatch("bottom", 0.0, 0.0, 1),
            fixtures::swatch("middle", 0.0, 0.0, 2),
        ]);
        let ids: Vec<&str> = s.paint_order().iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, ["bottom", "middle", "top"]);
    }

    #[test]
    fn test_hit_test_picks_top_most() {
        let s = fixtures::moodboard_with(vec![
            fixtures::swatch("under", 0.0, 0.0, 1),
            fixtures::swatch("over", 50.0, 50.0, 2),
        ]);
        assert_eq!(s.element_at(60.0, 60.0).map(|e| e.id().as_str()), Some("over"));
        assert_eq!(s.element_at(10.0, 10.0).map(|e| e.id().as_str()), Some("under"));
        assert!(s.element_at(500.0, 500.0).is_none());
    }

    #[test]
    fn test_hit_test_respects_rotation() {
        let mut el = fixtures::swatch("r", 100.0, 100.0, 1);
        el.frame.rotation = 90.0;
        let s = fixtures::moodboard_with(vec![el]);
        // Rotated a quarter turn clockwise around its top-left corner
        assert!(s.element_at(50.0, 150.0).is_some());
        assert!(s.element_at(150.0, 150.0).is_none());
    }

    #[test]
    fn test_background_click_clears_selection() {
        let mut s = fixtures::moodboard_with(vec![fixtures::swatch("a", 0.0, 0.0, 1)]);
        assert_eq!(s.pointer_down(20.0, 20.0).as_deref(), Some("a"));
        assert!(s.is_selected("a"));
        assert_eq!(s.pointer_down(700.0, 500.0), None);
        assert!(s.selected().is_none());
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut s = MoodboardSession::default();
        for _ in 0..30 {
            s.zoom_in();
        }
        assert!((s.zoom() - 2.0).abs() < 1e-9);
        for _ in 0..30 {
            s.zoom_out();
        }
        assert!((s.zoom() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_pointer_down_uses_zoomed_coordinates() {
        let mut s = fixtures::moodboard_with(vec![fixtures::swatch("a", 100.0, 100.0, 1)]);
        s.set_zoom(2.0);
        assert_eq!(s.pointer_down(220.0, 220.0).as_deref(), Some("a"));
        assert_eq!(s.pointer_down(120.0, 120.0), None);
    }
}
