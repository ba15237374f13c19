//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = RamboxConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_window_too_small() {
    let mut config = RamboxConfig::default();
    config.window.width = 100;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width"));
}

#[test]
fn catches_tab_bar_out_of_range() {
    let mut config = RamboxConfig::default();
    config.window.tab_bar_height = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.tab_bar_height"));
}

#[test]
fn catches_blank_title() {
    let mut config = RamboxConfig::default();
    config.window.title = "   ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.title"));
}

#[test]
fn catches_non_http_catalog_url() {
    let mut config = RamboxConfig::default();
    config.catalog.url = "file:///etc/services.json".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("catalog.url"));
}

#[test]
fn catches_zero_catalog_timeout() {
    let mut config = RamboxConfig::default();
    config.catalog.timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("catalog.timeout_secs"));
}

#[test]
fn catches_update_interval_too_short() {
    let mut config = RamboxConfig::default();
    config.updates.check_interval = 60;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("updates.check_interval"));
}

#[test]
fn catches_bad_update_endpoint() {
    let mut config = RamboxConfig::default();
    config.updates.endpoint = "updates.rambox.app".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("updates.endpoint"));
}

#[test]
fn catches_backup_count_zero() {
    let mut config = RamboxConfig::default();
    config.logging.backup_count = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("logging.backup_count"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = RamboxConfig::default();
    config.window.height = 1;
    config.logging.backup_count = 50;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.height"));
    assert!(err.contains("logging.backup_count"));
    assert!(err.contains("; "));
}

#[test]
fn accepts_http_localhost_endpoint() {
    let mut config = RamboxConfig::default();
    config.updates.endpoint = "http://localhost:8080".into();
    assert!(validate(&config).is_ok());
}
