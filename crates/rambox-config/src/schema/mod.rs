//! Configuration schema types for Rambox.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults below.

mod catalog;
mod general;
mod notifications;
mod services;
mod system;
mod window;

pub use catalog::*;
pub use general::*;
pub use notifications::*;
pub use services::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Rambox.
///
/// All options have sensible defaults. Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct RamboxConfig {
    pub general: GeneralConfig,
    pub window: WindowConfig,
    pub catalog: CatalogConfig,
    pub notifications: NotificationsConfig,
    pub services: ServicesConfig,
    pub updates: UpdatesConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
