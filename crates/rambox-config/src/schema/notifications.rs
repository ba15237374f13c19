//! Notification defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Master switch for OS notifications raised by the host.
    pub enabled: bool,
    /// Whether newly added services start muted.
    pub default_muted: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_muted: false,
        }
    }
}
