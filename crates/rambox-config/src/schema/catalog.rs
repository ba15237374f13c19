//! Remote service catalog settings.

use serde::{Deserialize, Serialize};

/// Where the add-service picker gets its templates from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// URL of the JSON array of catalog entries.
    pub url: String,
    /// Base URL that catalog `logo` file names are resolved against.
    pub icon_base_url: String,
    /// Request timeout in seconds (valid range: 1-120).
    pub timeout_secs: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: "https://raw.githubusercontent.com/ramboxapp/community-edition/master/resources/services.json".into(),
            icon_base_url: "https://raw.githubusercontent.com/ramboxapp/community-edition/master/resources/icons/".into(),
            timeout_secs: 10,
        }
    }
}
