//! Rambox configuration system.
//!
//! TOML-based configuration with validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rambox_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("catalog: {}", config.catalog.url);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;

// Re-export core types for convenience
pub use schema::{RamboxConfig, CONFIG_SCHEMA_VERSION};
pub use toml_writer::{save_config, save_config_to_path};

use std::path::Path;

use rambox_common::ConfigError;

/// Load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<RamboxConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path (the `--config` override).
///
/// The file is created from the default template when missing.
pub fn load_config_from(path: &Path) -> Result<RamboxConfig, ConfigError> {
    let config = toml_loader::load_or_create(path)?;
    validation::validate(&config)?;
    Ok(config)
}
