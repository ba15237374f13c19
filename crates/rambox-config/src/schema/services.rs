//! Defaults applied to every service web view.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ServicesConfig {
    /// User agent used when neither the service nor its catalog entry sets one.
    pub default_user_agent: Option<String>,
}
