//! Full configuration validation.
//!
//! Checks numeric ranges and URL shapes. Each rule pushes a message into a
//! shared list; the orchestrator joins them into a single `ConfigError`.

mod helpers;
mod rules;

#[cfg(test)]
mod tests;

use crate::schema::RamboxConfig;
use rambox_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &RamboxConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    rules::validate_window(&mut errors, config);
    rules::validate_catalog(&mut errors, config);
    rules::validate_updates(&mut errors, config);
    rules::validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
