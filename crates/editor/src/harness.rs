//! Headless test harness for programmatic room and moodboard manipulation.
//!
//! Drives the same session and viewport code an interactive host would,
//! with helpers that turn world positions into screen pointer events.

use egui::{PointerButton, Pos2};
use glam::DVec3;
use shared::{FurnitureInstance, ObjectId};

use crate::catalog::{find_template, FurnitureTemplate};
use crate::compose::tessellate::{tessellate, SceneMeshes};
use crate::compose::ComposedScene;
use crate::fixtures;
use crate::state::moodboard::MoodboardSession;
use crate::state::room::RoomSession;
use crate::state::{EditorSettings, EditorState};
use crate::viewport::RoomViewport;

/// Headless test harness: editor state, room viewport and the last build
pub struct TestHarness {
    pub state: EditorState,
    pub viewport: RoomViewport,
    last_meshes: Option<SceneMeshes>,
}

impl TestHarness {
    /// Create a harness with default settings and an 800×600 viewport.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        let viewport = RoomViewport::new(&settings, fixtures::viewport_rect());
        Self {
            state: EditorState::new(settings),
            viewport,
            last_meshes: None,
        }
    }

    pub fn room(&self) -> &RoomSession {
        &self.state.room
    }

    pub fn room_mut(&mut self) -> &mut RoomSession {
        &mut self.state.room
    }

    pub fn moodboard(&self) -> &MoodboardSession {
        &self.state.moodboard
    }

    pub fn moodboard_mut(&mut self) -> &mut MoodboardSession {
        &mut self.state.moodboard
    }

    // ── Furniture ─────────────────────────────────────────────

    /// Add an item from the built-in catalog by its slug
    pub fn add_from_catalog(&mut self, slug: &str) -> Option<ObjectId> {
        let template = find_template(slug)?;
        Some(self.state.room.add_furniture(&template))
    }

    pub fn add_template(&mut self, template: &FurnitureTemplate) -> ObjectId {
        self.state.room.add_furniture(template)
    }

    /// Add a generic 1×1×1 box at (x, z) under a fixed id
    pub fn add_box(&mut self, id: &str, x: f64, z: f64) -> ObjectId {
        self.state.room.add_instance(fixtures::unit_box(id, x, z))
    }

    pub fn delete_furniture(&mut self, id: &str) -> bool {
        let removed = self.state.room.delete_furniture(id);
        self.viewport.sync(&self.state.room);
        removed
    }

    /// Select through the viewport so a pending drag on the old selection ends
    pub fn select_furniture(&mut self, id: &str) -> bool {
        self.viewport.select(&mut self.state.room, id)
    }

    pub fn clear_selection(&mut self) -> Option<ObjectId> {
        self.viewport.clear_selection(&mut self.state.room)
    }

    pub fn furniture(&self, id: &str) -> Option<&FurnitureInstance> {
        self.state.room.get(id)
    }

    pub fn furniture_count(&self) -> usize {
        self.state.room.furniture().len()
    }

    pub fn position_of(&self, id: &str) -> Option<[f64; 3]> {
        self.furniture(id).map(|f| f.position())
    }

    // ── Projection ────────────────────────────────────────────

    /// Screen position of a world point for the current camera
    pub fn screen_of(&self, point: DVec3) -> Option<Pos2> {
        self.viewport.camera().project(point, self.viewport.rect())
    }

    /// Screen position of the middle of an instance's box
    pub fn screen_of_instance(&self, id: &str) -> Option<Pos2> {
        let f = self.furniture(id)?;
        let [x, y, z] = f.position();
        self.screen_of(DVec3::new(x, y + f.footprint.height / 2.0, z))
    }

    /// Screen position of a floor point (y = 0)
    pub fn screen_of_floor(&self, x: f64, z: f64) -> Option<Pos2> {
        self.screen_of(DVec3::new(x, 0.0, z))
    }

    /// Floor point under a screen position, if the ray reaches the floor
    pub fn floor_under(&self, pos: Pos2) -> Option<DVec3> {
        let ray = self.viewport.camera().screen_ray(pos, self.viewport.rect());
        crate::viewport::picking::ray_ground(&ray)
    }

    // ── Pointer input ─────────────────────────────────────────

    pub fn press_at(&mut self, pos: Pos2, shift: bool) -> Option<ObjectId> {
        self.viewport
            .pointer_down(&mut self.state.room, pos, PointerButton::Primary, shift)
    }

    /// Press on the middle of an instance. Returns the id that was hit.
    pub fn press_on(&mut self, id: &str, shift: bool) -> Option<ObjectId> {
        let pos = self.screen_of_instance(id)?;
        self.press_at(pos, shift)
    }

    pub fn move_to(&mut self, pos: Pos2, shift: bool) -> bool {
        self.viewport.pointer_move(&mut self.state.room, pos, shift)
    }

    /// Move the pointer over a floor point
    pub fn move_to_floor(&mut self, x: f64, z: f64) -> bool {
        match self.screen_of_floor(x, z) {
            Some(pos) => self.move_to(pos, false),
            None => false,
        }
    }

    pub fn release(&mut self) -> bool {
        self.viewport.pointer_up(&mut self.state.room)
    }

    /// Pointer released outside the viewport: only the global fallback fires
    pub fn release_outside(&mut self) -> Vec<ObjectId> {
        self.viewport.global_pointer_up(&mut self.state.room)
    }

    /// Press on an instance, move it to a floor point and release
    pub fn drag_furniture_to(&mut self, id: &str, x: f64, z: f64) -> bool {
        if self.press_on(id, false).as_deref() != Some(id) {
            return false;
        }
        self.move_to_floor(x, z);
        self.release()
    }

    /// Shift-drag an instance horizontally by `dx_ndc` of the viewport width
    pub fn rotate_furniture(&mut self, id: &str, dx_ndc: f64) -> bool {
        let Some(start) = self.screen_of_instance(id) else {
            return false;
        };
        if self.press_at(start, true).as_deref() != Some(id) {
            return false;
        }
        let dx = dx_ndc * f64::from(self.viewport.rect().width()) / 2.0;
        self.move_to(egui::pos2(start.x + dx as f32, start.y), true);
        self.release()
    }

    pub fn camera_enabled(&self) -> bool {
        self.viewport.camera_enabled()
    }

    // ── History ───────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        let done = self.state.room.undo();
        self.viewport.sync(&self.state.room);
        done
    }

    pub fn redo(&mut self) -> bool {
        let done = self.state.room.redo();
        self.viewport.sync(&self.state.room);
        done
    }

    // ── Build + inspection ────────────────────────────────────

    pub fn compose(&self) -> ComposedScene {
        self.viewport.compose(&self.state.room, &self.state.settings.grid)
    }

    /// Tessellate the composed room
    pub fn build(&mut self) -> &SceneMeshes {
        self.last_meshes.insert(tessellate(&self.compose()))
    }

    pub fn meshes(&self) -> Option<&SceneMeshes> {
        self.last_meshes.as_ref()
    }

    pub fn export_room_json(&self) -> String {
        self.state.room.to_json().unwrap_or_default()
    }

    pub fn load_room_json(&mut self, json: &str) -> Result<(), String> {
        self.state.room.load_json(json)?;
        self.viewport.sync(&self.state.room);
        Ok(())
    }

    pub fn export_moodboard_json(&self) -> String {
        self.state.moodboard.to_json().unwrap_or_default()
    }

    pub fn load_moodboard_json(&mut self, json: &str) -> Result<(), String> {
        self.state.moodboard.load_json(json)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_empty() {
        let h = TestHarness::new();
        assert_eq!(h.furniture_count(), 0);
        assert!(h.moodboard().elements().is_empty());
        assert!(h.camera_enabled());
    }

    #[test]
    fn test_add_from_catalog() {
        let mut h = TestHarness::new();
        let id = h.add_from_catalog("sofa").unwrap();
        assert_eq!(h.furniture(&id).unwrap().display_name, "3-Seat Sofa");
        assert!(h.room().is_selected(&id));
        assert!(h.add_from_catalog("spaceship").is_none());
    }

    #[test]
    fn test_drag_moves_and_commits_once() {
        let mut h = TestHarness::new();
        h.add_box("a", 0.0, 0.0);
        let before = h.room().history_len();

        assert!(h.drag_furniture_to("a", 1.0, 1.0));
        let [x, y, z] = h.position_of("a").unwrap();
        assert_eq!(y, 0.0);
        assert!(x > 0.5 && z > 0.5);
        assert_eq!(h.room().history_len(), before + 1);
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut h = TestHarness::new();
        h.add_box("a", 0.0, 0.0);
        assert!(h.undo());
        assert_eq!(h.furniture_count(), 0);
        assert!(h.redo());
        assert_eq!(h.furniture_count(), 1);
    }

    #[test]
    fn test_load_export_json() {
        let mut h = TestHarness::new();
        h.add_box("a", 1.0, 1.0);
        let json = h.export_room_json();

        let mut h2 = TestHarness::new();
        h2.load_room_json(&json).unwrap();
        assert_eq!(h2.furniture_count(), 1);
    }

    #[test]
    fn test_build_produces_meshes() {
        let mut h = TestHarness::new();
        h.add_from_catalog("chair");
        let meshes = h.build();
        assert!(!meshes.opaque.is_empty());
        assert!(h.meshes().is_some());
    }
}
