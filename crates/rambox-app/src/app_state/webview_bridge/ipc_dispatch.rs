//! IPC message validation and dispatch from web views to Rust handlers.
//!
//! The sending view's id decides its role: the chrome view may only send
//! chrome kinds, service pages only service kinds. Anything else is
//! dropped with a warning.

use rambox_common::ServiceId;
use rambox_webview::{ChromeMessage, IpcRole, ServiceMessage};

use crate::app_state::core::RamboxApp;

impl RamboxApp {
    /// Handle a single IPC message from a web view.
    pub(in crate::app_state) fn handle_ipc_message(&mut self, view_id: u32, body: &str) {
        let role = IpcRole::for_view(view_id);
        match role {
            IpcRole::Chrome => match ChromeMessage::parse(body) {
                Ok(message) => {
                    tracing::debug!(view_id, ?message, "chrome IPC dispatched");
                    self.handle_chrome_message(message);
                }
                Err(e) => {
                    tracing::warn!(view_id, role = role.name(), error = %e, "IPC message rejected");
                }
            },
            IpcRole::Service => match ServiceMessage::parse(body) {
                Ok(message) => {
                    let id = ServiceId(view_id);
                    if self.registry.get(id).is_none() {
                        tracing::warn!(service_id = %id, "IPC from unknown service dropped");
                        return;
                    }
                    tracing::debug!(service_id = %id, ?message, "service IPC dispatched");
                    self.handle_service_message(id, message);
                }
                Err(e) => {
                    tracing::warn!(view_id, role = role.name(), error = %e, "IPC message rejected");
                }
            },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
