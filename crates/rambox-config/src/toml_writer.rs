//! Write RamboxConfig to TOML on disk.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place, so a
//! crash mid-write never leaves a truncated config behind.

use std::path::Path;

use rambox_common::ConfigError;

use crate::schema::RamboxConfig;
use crate::toml_loader::default_config_path;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Write config to the platform default path (`~/.config/rambox/config.toml`).
pub fn save_config(config: &RamboxConfig) -> Result<(), ConfigError> {
    let path = default_config_path()?;
    save_config_to_path(config, &path)
}

/// Write config to a specific path, creating parent directories as needed.
pub fn save_config_to_path(config: &RamboxConfig, path: &Path) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize config to TOML: {e}")))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, &toml_str).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write config to {}: {e}",
            tmp_path.display()
        ))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // Windows refuses to rename over an open file
        tracing::warn!("atomic rename failed ({}), falling back to direct write", e);
        std::fs::write(path, &toml_str).map_err(|e2| {
            ConfigError::ParseError(format!(
                "failed to write config to {}: {e2}",
                path.display()
            ))
        })?;
        let _ = std::fs::remove_file(&tmp_path);
    }

    tracing::debug!(path = %path.display(), "Config saved to disk");
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_config_writes_valid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        save_config_to_path(&RamboxConfig::default(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: RamboxConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed.window.title, "Rambox");
    }

    #[test]
    fn save_config_persists_dont_disturb() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = RamboxConfig::default();
        config.general.dont_disturb = true;
        save_config_to_path(&config, &path).unwrap();

        let parsed = crate::toml_loader::load_from_path(&path).unwrap();
        assert!(parsed.general.dont_disturb);
        assert_eq!(parsed.catalog.url, config.catalog.url);
        assert_eq!(parsed.updates.check_interval, config.updates.check_interval);
    }

    #[test]
    fn save_config_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("config.toml");

        save_config_to_path(&RamboxConfig::default(), &path).unwrap();

        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[general]"));
    }

    #[test]
    fn save_config_cleans_up_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        save_config_to_path(&RamboxConfig::default(), &path).unwrap();

        let tmp_path = path.with_extension("toml.tmp");
        assert!(
            !tmp_path.exists(),
            "tmp file should be cleaned up after rename"
        );
    }
}
