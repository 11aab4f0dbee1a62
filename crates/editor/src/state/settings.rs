//! Editor settings

use std::f64::consts::PI;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Pointer interaction settings for furniture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSettings {
    /// Yaw change (radians) per unit of horizontal NDC travel while rotating
    pub rotation_speed: f64,
    /// Gap kept between a dragged object's bounding circle and the walls
    pub wall_clearance: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            rotation_speed: PI,
            wall_clearance: 0.2,
        }
    }
}

/// Orbit camera settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Initial enabled state of the orbit controls
    pub enabled: bool,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Smallest polar angle from the vertical (radians)
    pub min_polar: f64,
    /// Largest polar angle; keeps the camera above the floor
    pub max_polar: f64,
    pub fov_degrees: f64,
    pub rotate_speed: f64,
    pub zoom_speed: f64,
    pub pan_speed: f64,
    pub damping: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_distance: 5.0,
            max_distance: 30.0,
            min_polar: 0.3,
            max_polar: PI / 2.1,
            fov_degrees: 50.0,
            rotate_speed: 0.8,
            zoom_speed: 0.8,
            pan_speed: 0.8,
            damping: 0.1,
        }
    }
}

/// Floor grid settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Label every N-th grid line
    pub label_every: usize,
    /// Show the red room outline on the floor
    pub show_outline: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            label_every: 2,
            show_outline: true,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Snapshots kept before the oldest is dropped
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { limit: 100 }
    }
}

/// Moodboard canvas settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasSettings {
    pub stage_width: f64,
    pub stage_height: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            stage_width: 800.0,
            stage_height: 600.0,
            min_zoom: 0.5,
            max_zoom: 2.0,
            zoom_step: 0.1,
        }
    }
}

/// All editor settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub interaction: InteractionSettings,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub canvas: CanvasSettings,
}

impl EditorSettings {
    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "roomboard", "roomboard")
    }

    /// Path of the settings file, if a config directory exists
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(json) = std::fs::read_to_string(&path) {
                match serde_json::from_str(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring malformed settings file {}: {e}", path.display()),
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = Self::project_dirs() {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(&config_path, json) {
                        tracing::warn!("Failed to save settings: {e}");
                    }
                }
            }
        }
    }
}
