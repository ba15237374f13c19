//! Host side of the chrome view: pushing state in, handling its requests.

use rambox_webview::ipc::{ChromeMessage, HostMessage, ToastLevel};

use crate::app_state::catalog::catalog_payload;
use crate::app_state::core::RamboxApp;

// =============================================================================
// HOST -> CHROME
// =============================================================================

impl RamboxApp {
    fn push_to_chrome(&self, message: &HostMessage) {
        if !self.chrome_ready {
            return;
        }
        let Some(handle) = self.webviews.as_ref().and_then(|r| r.chrome()) else {
            return;
        };
        if let Err(e) = handle.send(message) {
            tracing::warn!(kind = message.kind, error = %e, "Failed to push to chrome");
        }
    }

    pub(in crate::app_state) fn push_tabs(&self) {
        self.push_to_chrome(&HostMessage::tabs(
            &self.strip,
            self.registry.services(),
            self.active,
            &self.failed,
        ));
    }

    pub(in crate::app_state) fn push_badges(&self) {
        self.push_to_chrome(&HostMessage::badges(&self.unread.badges(), self.unread.total()));
    }

    pub(in crate::app_state) fn push_catalog(&self) {
        if let Some(ref catalog) = self.catalog {
            self.push_to_chrome(&HostMessage::catalog(catalog_payload(
                catalog,
                &self.config.catalog.icon_base_url,
            )));
        }
    }

    pub(in crate::app_state) fn push_dont_disturb(&self) {
        self.push_to_chrome(&HostMessage::dont_disturb(self.config.general.dont_disturb));
    }

    pub(in crate::app_state) fn push_update(&self) {
        if self.update_dismissed {
            return;
        }
        if let Some(ref release) = self.pending_update {
            self.push_to_chrome(&HostMessage::update_available(
                &release.name,
                release.notes.as_deref(),
            ));
        }
    }

    pub(in crate::app_state) fn toast(&self, level: ToastLevel, text: impl Into<String>) {
        self.push_to_chrome(&HostMessage::toast(level, text));
    }

    /// Everything the chrome needs after (re)loading.
    fn push_full_state(&self) {
        self.push_tabs();
        self.push_badges();
        self.push_catalog();
        self.push_dont_disturb();
        self.push_update();
    }

    /// Grow the chrome over the whole window while a dialog is open.
    pub(in crate::app_state) fn set_overlay(&mut self, open: bool) {
        if self.overlay_open == open {
            return;
        }
        self.overlay_open = open;
        self.sync_webview_bounds();
        self.apply_visibility();
    }

    // =========================================================================
    // CHROME -> HOST
    // =========================================================================

    pub(in crate::app_state) fn handle_chrome_message(&mut self, message: ChromeMessage) {
        match message {
            ChromeMessage::ChromeReady => {
                self.chrome_ready = true;
                self.push_full_state();
            }
            ChromeMessage::ActivateTab { service_id } => self.activate_tab(service_id),
            ChromeMessage::AddService(request) => self.add_service(request),
            ChromeMessage::RemoveService { service_id } => self.remove_service(service_id),
            ChromeMessage::RemoveAllServices => self.remove_all_services(),
            ChromeMessage::MoveService {
                service_id,
                align,
                index,
            } => self.move_service(service_id, align, index),
            ChromeMessage::UpdateService { service_id, patch } => {
                self.update_service(service_id, patch)
            }
            ChromeMessage::SetEnabled {
                service_id,
                enabled,
            } => self.set_service_enabled(service_id, enabled),
            ChromeMessage::ReloadService { service_id } => self.reload_service(service_id),
            ChromeMessage::Zoom { service_id, action } => self.zoom_service(service_id, action),
            ChromeMessage::ToggleDontDisturb => self.toggle_dont_disturb(),
            ChromeMessage::SetOverlay { open } => self.set_overlay(open),
            ChromeMessage::InstallUpdate => self.install_update(),
            ChromeMessage::DismissUpdate => {
                self.update_dismissed = true;
                tracing::info!("Update dismissed for this session");
            }
            ChromeMessage::ToggleDevtools { service_id } => {
                self.toggle_devtools(service_id);
            }
            ChromeMessage::GoBack { service_id } => {
                self.go_back(service_id);
            }
            ChromeMessage::GoForward { service_id } => {
                self.go_forward(service_id);
            }
            ChromeMessage::FindInPage {
                service_id,
                query,
                backwards,
            } => {
                self.find_in_page(service_id, &query, backwards);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
