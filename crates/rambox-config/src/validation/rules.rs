//! Per-section validation rules.

use crate::schema::RamboxConfig;

use super::helpers::{validate_http_url, validate_range};

/// Validate window geometry.
pub(crate) fn validate_window(errors: &mut Vec<String>, config: &RamboxConfig) {
    validate_range(errors, "window.width", config.window.width, 400, 7680);
    validate_range(errors, "window.height", config.window.height, 300, 4320);
    validate_range(
        errors,
        "window.tab_bar_height",
        config.window.tab_bar_height,
        28,
        96,
    );
    if config.window.title.trim().is_empty() {
        errors.push("window.title must not be empty".into());
    }
}

/// Validate the catalog source.
pub(crate) fn validate_catalog(errors: &mut Vec<String>, config: &RamboxConfig) {
    validate_http_url(errors, "catalog.url", &config.catalog.url);
    validate_http_url(errors, "catalog.icon_base_url", &config.catalog.icon_base_url);
    validate_range(
        errors,
        "catalog.timeout_secs",
        config.catalog.timeout_secs,
        1,
        120,
    );
}

/// Validate updates constraints.
pub(crate) fn validate_updates(errors: &mut Vec<String>, config: &RamboxConfig) {
    validate_range(
        errors,
        "updates.check_interval",
        config.updates.check_interval,
        3600,
        604800,
    );
    validate_http_url(errors, "updates.endpoint", &config.updates.endpoint);
}

/// Validate logging constraints.
pub(crate) fn validate_logging(errors: &mut Vec<String>, config: &RamboxConfig) {
    validate_range(
        errors,
        "logging.backup_count",
        config.logging.backup_count,
        1,
        10,
    );
}
