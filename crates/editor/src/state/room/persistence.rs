//! Room design save/load and autosave

use std::path::{Path, PathBuf};

use shared::RoomDesign;

use crate::validation;

use super::RoomSession;

impl RoomSession {
    /// Serialize the current design
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(&self.design).map_err(|e| format!("Serialize error: {e}"))
    }

    /// Parse and repair a design document
    pub fn parse_design(json: &str) -> Result<RoomDesign, String> {
        let mut design: RoomDesign =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        for warning in validation::repair_room_design(&mut design) {
            tracing::warn!("{warning}");
        }
        Ok(design)
    }

    /// Load a design, replacing the session state and history
    pub fn load_json(&mut self, json: &str) -> Result<(), String> {
        let design = Self::parse_design(json)?;
        tracing::info!("Loaded room design '{}' with {} items", design.name, design.furniture.len());
        self.replace_design(design);
        Ok(())
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }

    pub fn load_from_file(&mut self, path: &Path) -> Result<(), String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        self.load_json(&json)
    }

    /// Get autosave file path
    fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "roomboard", "roomboard")
            .map(|dirs| dirs.data_dir().join("autosave_room.json"))
    }

    /// Save design to autosave file
    pub fn autosave(&self) {
        if let Some(path) = Self::autosave_path() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(e) = self.save_to_file(&path) {
                tracing::warn!("Autosave failed: {e}");
            }
        }
    }

    /// Load design from autosave file
    pub fn load_autosave() -> Option<RoomDesign> {
        let path = Self::autosave_path()?;
        let json = std::fs::read_to_string(&path).ok()?;
        Self::parse_design(&json).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_save_emits_tagged_records() {
        let s = fixtures::room_session_with(vec![fixtures::unit_box("a", 1.0, 2.0)]);
        let json: serde_json::Value = serde_json::from_str(&s.to_json().unwrap()).unwrap();
        assert_eq!(json["furniture"][0]["type"], "generic");
        assert_eq!(json["room"]["width"], 6.0);
    }

    #[test]
    fn test_load_resets_history_and_selection() {
        let mut s = RoomSession::default();
        s.add_instance(fixtures::unit_box("a", 0.0, 0.0));
        let json = fixtures::room_session_with(vec![fixtures::unit_box("b", 0.0, 0.0)])
            .to_json()
            .unwrap();

        s.load_json(&json).unwrap();
        assert!(!s.can_undo());
        assert!(s.selected().is_none());
        assert_eq!(s.furniture()[0].id, "b");
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut s = RoomSession::default();
        let err = s.load_json("{not json").unwrap_err();
        assert!(err.starts_with("JSON parse error"));
    }
}
