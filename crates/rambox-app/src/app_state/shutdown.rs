//! Graceful shutdown: persist the active tab, destroy web views, stop
//! background tasks.

use rambox_common::{AppState, Event};

use super::core::RamboxApp;
use super::types::RUNTIME_SHUTDOWN_TIMEOUT;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl RamboxApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Persist the last active service
    /// 2. Destroy web views (services first, chrome last)
    /// 3. Shut down the tokio runtime (cancels catalog and update tasks)
    pub(super) fn shutdown(&mut self) {
        if self.state == AppState::ShuttingDown {
            return;
        }
        tracing::info!("Initiating graceful shutdown");
        self.state = AppState::ShuttingDown;

        // 1. Persist the last active service
        if let Err(e) = self.registry.set_last_active(self.active) {
            tracing::warn!(error = %e, "Failed to persist last active service");
        }

        // 2. Destroy all web views
        self.event_bus.publish(Event::Shutdown);
        if let Some(ref mut registry) = self.webviews {
            registry.destroy_all();
        }
        self.chrome_ready = false;

        // 3. Shut down tokio runtime
        self.catalog_rx = None;
        self.update_tx = None;
        self.update_rx = None;
        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
        }

        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
