//! Service management requested from the chrome: add, remove, reorder,
//! edit, enable, reload, zoom, page tools, and the don't-disturb switch.

use rambox_common::{Event, ServiceError, ServiceId};
use rambox_services::catalog::url::resolve_service_url;
use rambox_services::{Align, NewService, ServicePatch, TabStrip, ZoomAction};
use rambox_webview::ipc::{AddServiceRequest, ToastLevel};
use rambox_webview::scripts::{find_in_page_script, state_update_script};
use rambox_webview::WebViewHandle;

use super::core::RamboxApp;

impl RamboxApp {
    pub(super) fn first_enabled(&self) -> Option<ServiceId> {
        self.registry.iter().find(|s| s.enabled).map(|s| s.id)
    }

    /// Re-derive the strip from the registry and tell the chrome.
    pub(super) fn refresh_tabs(&mut self) {
        self.strip = TabStrip::materialize(self.registry.services());
        self.push_tabs();
        self.push_badges();
        self.update_window_title();
    }

    fn report(&self, action: &str, error: &ServiceError) {
        tracing::warn!(action, error = %error, "service operation failed");
        self.toast(ToastLevel::Error, format!("Could not {action}: {error}"));
    }

    // =========================================================================
    // ACTIVATION
    // =========================================================================

    /// Make `id` the visible tab. Disabled or unknown services are ignored.
    pub(super) fn activate_tab(&mut self, id: ServiceId) {
        match self.registry.get(id) {
            Some(s) if s.enabled => {}
            Some(_) => {
                tracing::debug!(service_id = %id, "cannot activate a disabled service");
                return;
            }
            None => {
                tracing::warn!(service_id = %id, "activate requested for unknown service");
                return;
            }
        }

        self.active = Some(id);
        if let Err(e) = self.registry.set_last_active(Some(id)) {
            tracing::warn!(service_id = %id, error = %e, "failed to persist active tab");
        }
        self.event_bus.publish(Event::TabActivated(id));
        self.apply_visibility();
        self.push_tabs();
        self.update_window_title();
    }

    // =========================================================================
    // ADD / REMOVE
    // =========================================================================

    pub(super) fn add_service(&mut self, request: AddServiceRequest) {
        match self.try_add_service(request) {
            Ok(id) => {
                self.event_bus.publish(Event::ServiceAdded(id));
                self.refresh_tabs();
                self.create_service_view(id);
                self.activate_tab(id);
            }
            Err(e) => self.report("add the service", &e),
        }
    }

    /// Turn a picker submission into a registry record.
    pub(super) fn try_add_service(
        &mut self,
        request: AddServiceRequest,
    ) -> Result<ServiceId, ServiceError> {
        let entry = self
            .catalog
            .as_ref()
            .and_then(|c| c.get(&request.catalog_id))
            .ok_or_else(|| {
                ServiceError::Invalid(format!("unknown catalog entry {:?}", request.catalog_id))
            })?;

        let url = resolve_service_url(entry, request.url_input.as_deref())?;
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&entry.name)
            .to_string();

        let new = NewService::new(entry.id.clone(), name, url)
            .align(request.align.unwrap_or_default())
            .kind(entry.kind)
            .logo(entry.logo_url(&self.config.catalog.icon_base_url))
            .notifications(request.notifications.unwrap_or(true))
            .muted(
                request
                    .muted
                    .unwrap_or(self.config.notifications.default_muted),
            );

        let id = self.registry.add(new)?;
        tracing::info!(service_id = %id, catalog_id = %request.catalog_id, "Service added");
        Ok(id)
    }

    pub(super) fn remove_service(&mut self, id: ServiceId) {
        if let Err(e) = self.registry.remove(id) {
            self.report("remove the service", &e);
            return;
        }
        tracing::info!(service_id = %id, "Service removed");
        self.forget_service(id);
        self.event_bus.publish(Event::ServiceRemoved(id));

        if self.active == Some(id) {
            self.active = None;
            if let Some(next) = self.first_enabled() {
                self.activate_tab(next);
            }
        }
        self.refresh_tabs();
    }

    pub(super) fn remove_all_services(&mut self) {
        let ids: Vec<ServiceId> = self.registry.iter().map(|s| s.id).collect();
        if let Err(e) = self.registry.remove_all() {
            self.report("remove all services", &e);
            return;
        }
        for id in ids {
            self.forget_service(id);
            self.event_bus.publish(Event::ServiceRemoved(id));
        }
        self.active = None;
        tracing::info!("All services removed");
        self.refresh_tabs();
    }

    /// Drop the view and any unread state of a removed service.
    fn forget_service(&mut self, id: ServiceId) {
        self.destroy_service_view(id);
        self.unread.remove(id);
        self.failed.remove(&id);
    }

    // =========================================================================
    // EDITS
    // =========================================================================

    pub(super) fn move_service(&mut self, id: ServiceId, align: Align, index: usize) {
        if let Err(e) = self.registry.move_to(id, align, index) {
            self.report("move the service", &e);
            return;
        }
        self.event_bus.publish(Event::ServiceUpdated(id));
        self.refresh_tabs();
    }

    pub(super) fn update_service(&mut self, id: ServiceId, patch: ServicePatch) {
        let Some(before) = self.registry.get(id).cloned() else {
            self.report("update the service", &ServiceError::NotFound(id));
            return;
        };
        if let Err(e) = self.registry.update(id, patch) {
            self.report("update the service", &e);
            return;
        }
        let Some(after) = self.registry.get(id).cloned() else {
            return;
        };

        // Counter flags changed: recompute badge and total contribution.
        self.unread.refresh(&after);

        let rebuild = before.url != after.url
            || before.user_agent != after.user_agent
            || before.js_unread != after.js_unread;
        if after.enabled && rebuild {
            self.recreate_service_view(id);
        } else if before.notifications != after.notifications || before.muted != after.muted {
            self.push_service_state(id);
        }

        self.event_bus.publish(Event::ServiceUpdated(id));
        self.refresh_tabs();
    }

    pub(super) fn set_service_enabled(&mut self, id: ServiceId, enabled: bool) {
        if let Err(e) = self.registry.set_enabled(id, enabled) {
            self.report("change the service", &e);
            return;
        }

        if enabled {
            self.create_service_view(id);
            if self.active.is_none() {
                self.activate_tab(id);
            }
        } else {
            self.destroy_service_view(id);
            self.unread.clear(id);
            self.failed.remove(&id);
            if self.active == Some(id) {
                self.active = None;
                if let Some(next) = self.first_enabled() {
                    self.activate_tab(next);
                }
            }
        }
        self.apply_visibility();
        self.event_bus.publish(Event::ServiceUpdated(id));
        self.refresh_tabs();
    }

    pub(super) fn reload_service(&mut self, id: ServiceId) {
        if self.failed.contains_key(&id) {
            self.recreate_service_view(id);
            self.push_tabs();
            return;
        }
        let Some(handle) = self.webviews.as_ref().and_then(|r| r.get(id.0)) else {
            return;
        };
        if let Err(e) = handle.reload() {
            tracing::warn!(service_id = %id, error = %e, "reload failed");
        }
    }

    pub(super) fn zoom_service(&mut self, id: ServiceId, action: ZoomAction) {
        let zoom = match self.registry.set_zoom(id, action) {
            Ok(z) => z,
            Err(e) => {
                self.report("zoom", &e);
                return;
            }
        };
        tracing::debug!(service_id = %id, zoom, "zoom changed");
        if let Some(handle) = self.webviews.as_ref().and_then(|r| r.get(id.0)) {
            if let Err(e) = handle.zoom(zoom) {
                tracing::warn!(service_id = %id, error = %e, "zoom failed");
            }
        }
    }

    // =========================================================================
    // PAGE TOOLS
    // =========================================================================

    /// Run `f` on the live view of `id`. Returns false when there is none.
    fn with_service_view(
        &self,
        id: ServiceId,
        action: &str,
        f: impl FnOnce(&WebViewHandle) -> Result<(), wry::Error>,
    ) -> bool {
        let Some(handle) = self.webviews.as_ref().and_then(|r| r.get(id.0)) else {
            tracing::debug!(service_id = %id, action, "no live view");
            return false;
        };
        if let Err(e) = f(handle) {
            tracing::warn!(service_id = %id, action, error = %e, "page action failed");
        }
        true
    }

    pub(super) fn toggle_devtools(&mut self, id: ServiceId) -> bool {
        self.with_service_view(id, "devtools", |h| {
            h.toggle_devtools();
            Ok(())
        })
    }

    pub(super) fn go_back(&mut self, id: ServiceId) -> bool {
        self.with_service_view(id, "back", WebViewHandle::go_back)
    }

    pub(super) fn go_forward(&mut self, id: ServiceId) -> bool {
        self.with_service_view(id, "forward", WebViewHandle::go_forward)
    }

    pub(super) fn find_in_page(&mut self, id: ServiceId, query: &str, backwards: bool) -> bool {
        let script = find_in_page_script(query, backwards);
        self.with_service_view(id, "find", |h| h.evaluate_script(&script))
    }

    // =========================================================================
    // NOTIFICATION STATE
    // =========================================================================

    /// Push the notification and media-mute flags of one service into its
    /// live page.
    fn push_service_state(&self, id: ServiceId) {
        let Some(service) = self.registry.get(id) else {
            return;
        };
        let Some(handle) = self.webviews.as_ref().and_then(|r| r.get(id.0)) else {
            return;
        };
        let script = state_update_script(
            service.notifications && self.config.notifications.enabled,
            service.muted,
            self.config.general.dont_disturb,
        );
        if let Err(e) = handle.evaluate_script(&script) {
            tracing::warn!(service_id = %id, error = %e, "failed to push notification state");
        }
    }

    pub(super) fn toggle_dont_disturb(&mut self) {
        let enabled = !self.config.general.dont_disturb;
        self.config.general.dont_disturb = enabled;

        let saved = match self.config_path {
            Some(ref path) => rambox_config::save_config_to_path(&self.config, path),
            None => rambox_config::save_config(&self.config),
        };
        if let Err(e) = saved {
            tracing::warn!(error = %e, "failed to persist don't-disturb");
        }

        let ids: Vec<ServiceId> = self.registry.iter().map(|s| s.id).collect();
        for id in ids {
            self.push_service_state(id);
        }
        tracing::info!(enabled, "Don't disturb toggled");
        self.event_bus.publish(Event::DontDisturbChanged(enabled));
        self.push_dont_disturb();
    }
}

// =============================================================================
// TESTS
// =============================================================================
