//! General application behavior.

use serde::{Deserialize, Serialize};

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Suppress every notification, manual and page-initiated.
    pub dont_disturb: bool,
    /// Start with the window minimized.
    pub start_minimized: bool,
    /// Re-activate the tab that was active when the app last closed.
    pub restore_last_active: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            dont_disturb: false,
            start_minimized: false,
            restore_last_active: true,
        }
    }
}
