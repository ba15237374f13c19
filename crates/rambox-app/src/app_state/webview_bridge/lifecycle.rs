//! WebView lifecycle management: create, destroy, sync bounds, poll events.

use rambox_common::ServiceId;
use rambox_config::RamboxConfig;
use rambox_services::{Service, ServiceCatalogEntry};
use rambox_webview::{
    service_init_script, ServiceScriptOptions, WebViewConfig, WebViewEvent, CHROME_VIEW_ID,
};

use crate::app_state::core::RamboxApp;

use super::bounds::{chrome_rect, content_rect, rect_to_wry};

// =============================================================================
// SERVICE VIEW CONFIG
// =============================================================================

/// Build the web view config for a service from its record, its catalog
/// entry (if the catalog knows it), and the app config.
pub(in crate::app_state) fn service_view_config(
    service: &Service,
    entry: Option<&ServiceCatalogEntry>,
    config: &RamboxConfig,
) -> WebViewConfig {
    let script = service_init_script(&ServiceScriptOptions {
        notifications: service.notifications && config.notifications.enabled,
        muted: service.muted,
        dont_disturb: config.general.dont_disturb,
        catalog_js_unread: entry.map(|e| e.js_unread.clone()).unwrap_or_default(),
        custom_js_unread: service.js_unread.clone(),
        title_blink: entry.is_some_and(|e| e.title_blink),
    });

    // Service override, then the catalog's, then the global default.
    let user_agent = service
        .user_agent
        .clone()
        .or_else(|| entry.map(|e| e.user_agent.clone()))
        .filter(|ua| !ua.trim().is_empty())
        .or_else(|| config.services.default_user_agent.clone());

    WebViewConfig::service(service.url.clone())
        .with_init_script(script)
        .with_user_agent(user_agent)
        .with_allow_popups(entry.is_some_and(|e| e.allow_popups))
        .with_zoom(service.zoom)
}

// =============================================================================
// WEBVIEW LIFECYCLE
// =============================================================================

impl RamboxApp {
    /// Logical inner size of the window.
    fn logical_size(&self) -> Option<(f64, f64)> {
        let window = self.window.as_ref()?;
        let size = window.inner_size().to_logical::<f64>(window.scale_factor());
        Some((size.width, size.height))
    }

    fn tab_bar_height(&self) -> f64 {
        self.config.window.tab_bar_height as f64
    }

    pub(in crate::app_state) fn chrome_bounds(&self) -> wry::Rect {
        let (w, h) = self.logical_size().unwrap_or_default();
        rect_to_wry(&chrome_rect(w, h, self.tab_bar_height(), self.overlay_open))
    }

    fn content_bounds(&self) -> wry::Rect {
        let (w, h) = self.logical_size().unwrap_or_default();
        rect_to_wry(&content_rect(w, h, self.tab_bar_height()))
    }

    /// Create views for every enabled service. Called once the catalog
    /// has resolved.
    pub(in crate::app_state) fn create_service_views(&mut self) {
        let ids: Vec<ServiceId> = self
            .registry
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.id)
            .collect();
        for id in ids {
            self.create_service_view(id);
        }
        self.apply_visibility();
        self.push_tabs();
    }

    /// Create the web view for one service. A failure marks only that tab.
    pub(in crate::app_state) fn create_service_view(&mut self, id: ServiceId) {
        let Some(service) = self.registry.get(id) else {
            return;
        };
        if !service.enabled {
            return;
        }
        let entry = self
            .catalog
            .as_ref()
            .and_then(|c| c.get(&service.service_type));
        let config = service_view_config(service, entry, &self.config);
        let bounds = self.content_bounds();

        let (Some(window), Some(registry)) = (&self.window, &mut self.webviews) else {
            tracing::debug!(service_id = %id, "no window yet, view not created");
            return;
        };

        match registry.create(id.0, window.as_ref(), bounds, config) {
            Ok(()) => {
                self.failed.remove(&id);
                tracing::info!(service_id = %id, tab_id = %id.tab_id(), "Service view created");
            }
            Err(e) => {
                tracing::error!(service_id = %id, error = %e, "Failed to create service view");
                self.failed.insert(id, e.to_string());
            }
        }
    }

    pub(in crate::app_state) fn destroy_service_view(&mut self, id: ServiceId) {
        if let Some(ref mut registry) = self.webviews {
            if registry.destroy(id.0) {
                tracing::info!(service_id = %id, "Service view destroyed");
            }
        }
    }

    /// Rebuild a view after settings that only apply at creation changed.
    pub(in crate::app_state) fn recreate_service_view(&mut self, id: ServiceId) {
        self.destroy_service_view(id);
        self.create_service_view(id);
        self.apply_visibility();
    }

    /// Show the active service (unless a dialog covers it), hide the rest.
    pub(in crate::app_state) fn apply_visibility(&self) {
        let Some(ref registry) = self.webviews else {
            return;
        };
        for view_id in registry.service_view_ids() {
            let Some(handle) = registry.get(view_id) else {
                continue;
            };
            let visible = !self.overlay_open && self.active == Some(ServiceId(view_id));
            if let Err(e) = handle.set_visible(visible) {
                tracing::warn!(view_id, error = %e, "Failed to set view visibility");
            }
            if visible {
                if let Err(e) = handle.focus() {
                    tracing::debug!(view_id, error = %e, "Failed to focus view");
                }
            }
        }
    }

    /// Sync all view bounds to the current window size.
    pub(in crate::app_state) fn sync_webview_bounds(&mut self) {
        let chrome = self.chrome_bounds();
        let content = self.content_bounds();
        let Some(ref registry) = self.webviews else {
            return;
        };

        if let Some(handle) = registry.chrome() {
            if let Err(e) = handle.set_bounds(chrome) {
                tracing::warn!(error = %e, "Failed to update chrome bounds");
            }
        }
        for view_id in registry.service_view_ids() {
            if let Some(handle) = registry.get(view_id) {
                if let Err(e) = handle.set_bounds(content) {
                    tracing::warn!(view_id, error = %e, "Failed to update webview bounds");
                }
            }
        }
    }

    /// Process pending webview events (IPC messages, page loads, etc.).
    pub(in crate::app_state) fn poll_webview_events(&mut self) {
        let events: Vec<WebViewEvent> = match &self.webviews {
            Some(registry) => registry.drain_events(),
            None => return,
        };

        for event in events {
            match event {
                WebViewEvent::IpcMessage { view_id, body } => {
                    self.handle_ipc_message(view_id, &body);
                }
                WebViewEvent::TitleChanged { view_id, title } => {
                    if let Some(handle) = self.webviews.as_mut().and_then(|r| r.get_mut(view_id))
                    {
                        handle.set_title(title.clone());
                    }
                    if view_id != CHROME_VIEW_ID {
                        self.handle_title_changed(ServiceId(view_id), &title);
                    }
                }
                WebViewEvent::PageLoad {
                    view_id,
                    state,
                    url,
                } => {
                    tracing::debug!(view_id, ?state, url = %url, "WebView page load event");
                }
                WebViewEvent::NavigationRequested { view_id, url } => {
                    tracing::debug!(view_id, url = %url, "WebView navigation");
                }
                WebViewEvent::NewWindowRequested {
                    view_id,
                    url,
                    external,
                } => {
                    if !external {
                        self.open_popup_in_place(view_id, &url);
                    }
                }
                WebViewEvent::Closed { view_id } => {
                    tracing::debug!(view_id, "WebView closed event");
                }
            }
        }
    }

    fn open_popup_in_place(&mut self, view_id: u32, url: &str) {
        if let Some(handle) = self.webviews.as_mut().and_then(|r| r.get_mut(view_id)) {
            if let Err(e) = handle.load_url(url) {
                tracing::warn!(view_id, error = %e, "Failed to open popup in place");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
