//! Internal types and constants for the app state module.

use std::time::Duration;

/// How often to poll for events (approx 120 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Lower bound between two automatic update checks.
pub(super) const MIN_UPDATE_INTERVAL: Duration = Duration::from_secs(3600);

/// How long shutdown waits for background tasks.
pub(super) const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);
