//! Moodboard save/load and autosave

use std::path::{Path, PathBuf};

use shared::MoodboardDocument;

use crate::validation;

use super::MoodboardSession;

impl MoodboardSession {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(&self.document()).map_err(|e| format!("Serialize error: {e}"))
    }

    /// Parse a document, either `{name, elements}` or a bare element array
    pub fn parse_document(json: &str) -> Result<MoodboardDocument, String> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        let mut doc = if value.is_array() {
            MoodboardDocument {
                elements: serde_json::from_value(value).map_err(|e| format!("Invalid elements: {e}"))?,
                ..MoodboardDocument::default()
            }
        } else {
            serde_json::from_value(value).map_err(|e| format!("Invalid moodboard: {e}"))?
        };
        for warning in validation::repair_moodboard(&mut doc) {
            tracing::warn!("{warning}");
        }
        Ok(doc)
    }

    pub fn load_json(&mut self, json: &str) -> Result<(), String> {
        let doc = Self::parse_document(json)?;
        tracing::info!("Loaded moodboard '{}' with {} elements", doc.name, doc.elements.len());
        self.replace_document(doc);
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

    fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "roomboard", "roomboard")
            .map(|dirs| dirs.data_dir().join("autosave_moodboard.json"))
    }

    pub fn autosave(&self) {
        if let Some(path) = Self::autosave_path() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(e) = self.save_to_file(&path) {
                tracing::warn!("Moodboard autosave failed: {e}");
            }
        }
    }

    pub fn load_autosave() -> Option<MoodboardDocument> {
        let path = Self::autosave_path()?;
        let json = std::fs::read_to_string(&path).ok()?;
        Self::parse_document(&json).ok()
    }
}
