use std::path::PathBuf;

use crate::types::ServiceId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("window manager error: {0}")]
    WindowManagerError(String),

    #[error("notification error: {0}")]
    NotificationError(String),

    #[error("launch error: {0}")]
    LaunchError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Errors raised by the service registry, its store, and the catalog.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("service not found: {0}")]
    NotFound(ServiceId),

    #[error("invalid service: {0}")]
    Invalid(String),

    #[error("service store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RamboxError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("update error: {0}")]
    Update(String),

    #[error("{0}")]
    Other(String),
}
