use std::collections::HashMap;

use tracing::debug;
use wry::raw_window_handle;

use crate::events::WebViewEvent;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::{WebViewManager, CHROME_VIEW_ID};

/// Maps view ids (service ids, plus `CHROME_VIEW_ID`) to WebView handles.
pub struct WebViewRegistry {
    manager: WebViewManager,
    handles: HashMap<u32, WebViewHandle>,
}

impl WebViewRegistry {
    pub fn new(manager: WebViewManager) -> Self {
        Self {
            manager,
            handles: HashMap::new(),
        }
    }

    /// Create a WebView and register it, replacing any previous view with
    /// the same id.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        view_id: u32,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<(), wry::Error> {
        let handle = self.manager.create(view_id, window, bounds, config)?;
        if self.handles.insert(view_id, handle).is_some() {
            debug!(view_id, "replaced existing WebView");
        }
        Ok(())
    }

    pub fn get(&self, view_id: u32) -> Option<&WebViewHandle> {
        self.handles.get(&view_id)
    }

    pub fn get_mut(&mut self, view_id: u32) -> Option<&mut WebViewHandle> {
        self.handles.get_mut(&view_id)
    }

    pub fn chrome(&self) -> Option<&WebViewHandle> {
        self.get(CHROME_VIEW_ID)
    }

    /// Destroy a WebView by id.
    pub fn destroy(&mut self, view_id: u32) -> bool {
        if self.handles.remove(&view_id).is_some() {
            debug!(view_id, "WebView destroyed");
            self.manager.push_event(WebViewEvent::Closed { view_id });
            true
        } else {
            false
        }
    }

    /// Ids of all service views (the chrome excluded).
    pub fn service_view_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .handles
            .keys()
            .copied()
            .filter(|id| *id != CHROME_VIEW_ID)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Drain all pending events from all WebViews.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        self.manager.drain_events()
    }

    /// Destroy every WebView, the chrome last. Used during graceful shutdown.
    pub fn destroy_all(&mut self) {
        for view_id in self.service_view_ids() {
            self.destroy(view_id);
        }
        self.destroy(CHROME_VIEW_ID);
    }

    /// How many WebViews are active.
    pub fn count(&self) -> usize {
        self.handles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry() {
        let mut registry = WebViewRegistry::new(WebViewManager::new());
        assert_eq!(registry.count(), 0);
        assert!(registry.chrome().is_none());
        assert!(!registry.destroy(3));
        registry.destroy_all();
        assert!(registry.drain_events().is_empty());
    }
}
