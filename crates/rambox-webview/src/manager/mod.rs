//! WebView lifecycle management.
//!
//! `WebViewManager` creates `wry::WebView` instances: one chrome view for
//! the tab strip and one per enabled service. `WebViewRegistry` tracks them
//! by view id.

use std::sync::{Arc, Mutex};

use crate::content::ContentProvider;
use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod registry;
mod types;

pub use handle::WebViewHandle;
pub use handlers::NavigationPolicy;
pub use registry::WebViewRegistry;
pub use types::WebViewConfig;

/// View id reserved for the chrome. Service ids start at 1.
pub const CHROME_VIEW_ID: u32 = 0;

/// Creates WebViews and collects their events.
pub struct WebViewManager {
    /// Event sink. Events are pushed here for the main event loop to consume.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    /// Optional content provider for the `rambox://` custom protocol.
    content_provider: Option<Arc<ContentProvider>>,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            content_provider: None,
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Queue an event as if a view had emitted it.
    pub fn push_event(&self, event: WebViewEvent) {
        if let Ok(mut evts) = self.events.lock() {
            evts.push(event);
        }
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_queue_in_order() {
        let manager = WebViewManager::new();
        manager.push_event(WebViewEvent::Closed { view_id: 1 });
        manager.push_event(WebViewEvent::Closed { view_id: 2 });

        let drained = manager.drain_events();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].view_id(), 1);
        assert!(manager.drain_events().is_empty());
    }
}
