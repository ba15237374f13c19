use std::path::PathBuf;

use rambox_common::PlatformError;

pub(super) const APP_NAME: &str = "rambox";

/// Returns the platform-specific configuration directory for Rambox.
///
/// - macOS: `~/Library/Application Support/rambox`
/// - Linux: `$XDG_CONFIG_HOME/rambox` (defaults to `~/.config/rambox`)
/// - Windows: `%APPDATA%\rambox`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory for Rambox.
///
/// - macOS: `~/Library/Application Support/rambox`
/// - Linux: `$XDG_DATA_HOME/rambox` (defaults to `~/.local/share/rambox`)
/// - Windows: `%APPDATA%\rambox`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific cache directory for Rambox.
pub fn cache_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::cache_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine cache directory".into()))?
        .join(APP_NAME))
}

/// Returns the path to the main configuration file, `config_dir()/config.toml`.
pub fn config_file() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Returns the path to the persisted service list, `data_dir()/services.json`.
pub fn services_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("services.json"))
}

/// Returns the path to the log directory, `data_dir()/logs`.
pub fn log_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("logs"))
}

/// Returns the path to the crash report directory, `log_dir()/crash-reports`.
pub fn crash_report_dir() -> Result<PathBuf, PlatformError> {
    Ok(log_dir()?.join("crash-reports"))
}

/// Returns the directory downloaded update packages are stored in.
pub fn updates_dir() -> Result<PathBuf, PlatformError> {
    Ok(cache_dir()?.join("updates"))
}
