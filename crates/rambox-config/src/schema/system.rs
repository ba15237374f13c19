//! System configuration types: updates and logging.

use serde::{Deserialize, Serialize};

/// Update channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum UpdateChannel {
    #[default]
    Stable,
    Beta,
}

impl UpdateChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateChannel::Stable => "stable",
            UpdateChannel::Beta => "beta",
        }
    }
}

/// Auto-update configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatesConfig {
    pub check_automatically: bool,
    pub channel: UpdateChannel,
    /// Check interval in seconds (valid range: 3600-604800).
    pub check_interval: u32,
    /// Base URL of the update server. Requests go to
    /// `{endpoint}/update/{platform}/{version}`.
    pub endpoint: String,
}

impl Default for UpdatesConfig {
    fn default() -> Self {
        Self {
            check_automatically: true,
            channel: UpdateChannel::Stable,
            check_interval: 86400,
            endpoint: "https://updates.rambox.app".into(),
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The matching `tracing` level name.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Also write logs to `rambox.log` in the log directory.
    pub file_logging: bool,
    /// How many previous session logs to keep (valid range: 1-10).
    pub backup_count: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file_logging: true,
            backup_count: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_defaults() {
        let config = UpdatesConfig::default();
        assert!(config.check_automatically);
        assert_eq!(config.channel, UpdateChannel::Stable);
        assert_eq!(config.check_interval, 86400);
        assert!(config.endpoint.starts_with("https://"));
    }

    #[test]
    fn log_level_directives() {
        assert_eq!(LogLevel::Debug.as_directive(), "debug");
        assert_eq!(LogLevel::Warning.as_directive(), "warn");
        let parsed: LogLevel = serde_json::from_str("\"ERROR\"").unwrap();
        assert_eq!(parsed, LogLevel::Error);
    }

    #[test]
    fn channel_names() {
        assert_eq!(UpdateChannel::Stable.as_str(), "stable");
        assert_eq!(UpdateChannel::Beta.as_str(), "beta");
    }
}
