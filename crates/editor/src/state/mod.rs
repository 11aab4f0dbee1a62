pub mod history;
pub mod moodboard;
pub mod room;
pub mod settings;

pub use history::History;
pub use moodboard::{MoodboardSession, NodeTransform};
pub use room::RoomSession;
pub use settings::{CameraSettings, CanvasSettings, EditorSettings, GridSettings, InteractionSettings};

/// Combined authoring state: the 3D room and the 2D moodboard share nothing
/// but the settings they were created from
pub struct EditorState {
    pub room: RoomSession,
    pub moodboard: MoodboardSession,
    pub settings: EditorSettings,
}

impl EditorState {
    pub fn new(settings: EditorSettings) -> Self {
        let limit = settings.history.limit;
        Self {
            room: RoomSession::with_history_limit(Default::default(), limit),
            moodboard: MoodboardSession::with_settings(Default::default(), settings.canvas.clone(), limit),
            settings,
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}
