use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};

use super::WebViewManager;

// =============================================================================
// NAVIGATION POLICY
// =============================================================================

/// URL prefixes the chrome view may navigate to.
///
/// - `rambox://` is the custom protocol for the bundled chrome assets
/// - `http://rambox.localhost` is what WebView2 rewrites custom protocols to:
///   `rambox://localhost/…` → `http://rambox.localhost/…`
pub const CHROME_NAV_PREFIXES: &[&str] = &["rambox://", "http://rambox.localhost"];

/// URL prefixes a service view may navigate to.
pub const SERVICE_NAV_PREFIXES: &[&str] = &["http://", "https://", "about:blank"];

/// Which navigations a view accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    Chrome,
    Service,
}

impl NavigationPolicy {
    pub fn prefixes(self) -> &'static [&'static str] {
        match self {
            NavigationPolicy::Chrome => CHROME_NAV_PREFIXES,
            NavigationPolicy::Service => SERVICE_NAV_PREFIXES,
        }
    }

    pub fn allows(self, url: &str) -> bool {
        let lower = url.trim_start().to_ascii_lowercase();
        self.prefixes().iter().any(|prefix| lower.starts_with(prefix))
    }
}

/// What to do with a `window.open` / `target=_blank` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewWindowAction {
    /// Navigate the same view to the target.
    OpenInPlace,
    /// Hand the URL to the system browser.
    OpenExternal,
    Deny,
}

pub fn new_window_action(policy: NavigationPolicy, allow_popups: bool, url: &str) -> NewWindowAction {
    match policy {
        NavigationPolicy::Service if allow_popups && policy.allows(url) => {
            NewWindowAction::OpenInPlace
        }
        _ if rambox_platform::is_external_url(url) => NewWindowAction::OpenExternal,
        _ => NewWindowAction::Deny,
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

fn push(events: &Arc<Mutex<Vec<WebViewEvent>>>, event: WebViewEvent) {
    if let Ok(mut evts) = events.lock() {
        evts.push(event);
    }
}

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        view_id: u32,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            // Validate that the IPC body is valid JSON before forwarding
            if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                warn!(view_id, body_len = body.len(), "IPC message rejected: invalid JSON");
                return;
            }

            debug!(view_id, body_len = body.len(), "IPC message from JS");
            push(&events, WebViewEvent::IpcMessage { view_id, body });
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        view_id: u32,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(view_id, ?state, url = %url, "page load");
            push(&events, WebViewEvent::PageLoad { view_id, state, url });
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        view_id: u32,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(view_id, title_len = title.len(), "title changed");
            push(&events, WebViewEvent::TitleChanged { view_id, title });
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        view_id: u32,
        policy: NavigationPolicy,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if !policy.allows(&url) {
                warn!(view_id, ?policy, url = %url, "navigation blocked by policy");
                return false;
            }

            debug!(view_id, url = %url, "navigation allowed");
            push(&events, WebViewEvent::NavigationRequested { view_id, url });
            true
        })
    }

    pub(super) fn attach_new_window_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WebViewEvent>>>,
        view_id: u32,
        policy: NavigationPolicy,
        allow_popups: bool,
    ) -> WebViewBuilder<'a> {
        builder.with_new_window_req_handler(move |url| {
            match new_window_action(policy, allow_popups, &url) {
                NewWindowAction::OpenInPlace => {
                    debug!(view_id, url = %url, "popup opened in place");
                    push(
                        &events,
                        WebViewEvent::NewWindowRequested {
                            view_id,
                            url,
                            external: false,
                        },
                    );
                }
                NewWindowAction::OpenExternal => {
                    if let Err(e) = rambox_platform::open_external(&url) {
                        warn!(view_id, error = %e, "failed to open link in browser");
                    }
                    push(
                        &events,
                        WebViewEvent::NewWindowRequested {
                            view_id,
                            url,
                            external: true,
                        },
                    );
                }
                NewWindowAction::Deny => {
                    warn!(view_id, url = %url, "new window request denied");
                }
            }
            // Never let the engine spawn its own window
            false
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
