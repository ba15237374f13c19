//! RamboxApp struct definition and constructor.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use rambox_common::{AppState, EventBus, ServiceId};
use rambox_config::RamboxConfig;
use rambox_services::{ServiceCatalog, ServiceRegistry, TabStrip, UnreadCounter};
use rambox_webview::WebViewRegistry;

use crate::updater::{UpdateEvent, UpdateRelease};

/// Top-level application state.
pub struct RamboxApp {
    pub(super) config: RamboxConfig,
    /// Where don't-disturb changes are written back (`--config` override).
    pub(super) config_path: Option<PathBuf>,
    pub(super) event_bus: EventBus,
    pub(super) state: AppState,

    // Services
    pub(super) registry: ServiceRegistry,
    /// `None` until the remote fetch resolves, successfully or not.
    pub(super) catalog: Option<ServiceCatalog>,
    pub(super) unread: UnreadCounter,
    pub(super) strip: TabStrip,
    pub(super) active: Option<ServiceId>,
    /// Tabs whose web view could not be created, with the reason.
    pub(super) failed: BTreeMap<ServiceId, String>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) webviews: Option<WebViewRegistry>,
    pub(super) chrome_ready: bool,
    /// A chrome dialog covers the window.
    pub(super) overlay_open: bool,

    // Background work
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,
    pub(super) catalog_rx: Option<mpsc::Receiver<ServiceCatalog>>,
    pub(super) update_tx: Option<mpsc::Sender<UpdateEvent>>,
    pub(super) update_rx: Option<mpsc::Receiver<UpdateEvent>>,
    pub(super) check_updates: bool,
    pub(super) pending_update: Option<UpdateRelease>,
    pub(super) update_dismissed: bool,

    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl RamboxApp {
    pub fn new(config: RamboxConfig, registry: ServiceRegistry) -> Self {
        Self {
            config,
            config_path: None,
            event_bus: EventBus::new(256),
            state: AppState::Starting,
            registry,
            catalog: None,
            unread: UnreadCounter::new(),
            strip: TabStrip::Loading,
            active: None,
            failed: BTreeMap::new(),
            window: None,
            webviews: None,
            chrome_ready: false,
            overlay_open: false,
            tokio_runtime: None,
            catalog_rx: None,
            update_tx: None,
            update_rx: None,
            check_updates: true,
            pending_update: None,
            update_dismissed: false,
            should_exit: false,
            last_poll: Instant::now(),
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Disable update checks regardless of config (`--no-update-check`).
    pub fn with_update_checks(mut self, enabled: bool) -> Self {
        self.check_updates = enabled;
        self
    }
}

#[cfg(test)]
pub(super) mod test_support {
    use rambox_services::{NewService, ServiceStore};

    use super::*;

    /// An app over a temp-dir store. Keep the `TempDir` alive for the test.
    pub fn app() -> (RamboxApp, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = ServiceStore::new(dir.path().join("services.json"));
        let registry = ServiceRegistry::load(store).unwrap();
        let app = RamboxApp::new(RamboxConfig::default(), registry)
            .with_config_path(Some(dir.path().join("config.toml")));
        (app, dir)
    }

    /// Same, with services already added.
    pub fn app_with(services: Vec<NewService>) -> (RamboxApp, tempfile::TempDir) {
        let (mut app, dir) = app();
        for s in services {
            app.registry.add(s).unwrap();
        }
        app.strip = TabStrip::materialize(app.registry.services());
        (app, dir)
    }

    pub fn catalog(json: &str) -> ServiceCatalog {
        let entries = rambox_services::catalog::parse_catalog(json).unwrap();
        ServiceCatalog::new(entries)
    }
}
