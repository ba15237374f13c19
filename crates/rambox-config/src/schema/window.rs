//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Window startup mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum StartupMode {
    #[default]
    Windowed,
    Maximized,
    Fullscreen,
}

/// Host window settings.
///
/// `tab_bar_height` is the height of the chrome strip in logical pixels;
/// service web views fill the remaining area below it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Base window title. Unread totals and the active service are appended.
    pub title: String,
    /// Initial inner width in logical pixels (valid range: 400-7680).
    pub width: u32,
    /// Initial inner height in logical pixels (valid range: 300-4320).
    pub height: u32,
    pub startup_mode: StartupMode,
    /// Height of the tab strip (valid range: 28-96).
    pub tab_bar_height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Rambox".into(),
            width: 1280,
            height: 800,
            startup_mode: StartupMode::Windowed,
            tab_bar_height: 42,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
