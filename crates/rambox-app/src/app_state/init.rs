//! Window creation, web view setup, and background task startup.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, WindowAttributes};

use rambox_common::AppState;
use rambox_config::schema::StartupMode;
use rambox_services::TabStrip;
use rambox_webview::content::{ContentProvider, CHROME_URL};
use rambox_webview::{WebViewConfig, WebViewManager, WebViewRegistry, CHROME_VIEW_ID};

use super::core::RamboxApp;

impl RamboxApp {
    /// Create the window, the chrome view, and start background work.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window_cfg = &self.config.window;
        let mut attrs = WindowAttributes::default()
            .with_title(window_cfg.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_cfg.width as f64,
                window_cfg.height as f64,
            ))
            .with_min_inner_size(winit::dpi::LogicalSize::new(400.0, 300.0));

        match window_cfg.startup_mode {
            StartupMode::Windowed => {}
            StartupMode::Maximized => attrs = attrs.with_maximized(true),
            StartupMode::Fullscreen => {
                attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
            }
        }

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };
        if self.config.general.start_minimized {
            window.set_minimized(true);
        }
        self.window = Some(window);

        self.initialize_webviews();
        self.create_chrome_view();
        self.load_tabs();
        self.start_runtime();
        self.start_catalog_fetch();
        self.start_update_checks();

        self.state = AppState::Running;
        tracing::info!("Window created and services loaded");
        true
    }

    /// Set up the WebView registry with the embedded `rambox://` assets.
    fn initialize_webviews(&mut self) {
        let mut manager = WebViewManager::new();
        manager.set_content_provider(ContentProvider::embedded());
        self.webviews = Some(WebViewRegistry::new(manager));
        tracing::info!("WebView registry initialized");
    }

    fn create_chrome_view(&mut self) {
        let bounds = self.chrome_bounds();
        let (Some(window), Some(registry)) = (&self.window, &mut self.webviews) else {
            return;
        };
        if let Err(e) = registry.create(
            CHROME_VIEW_ID,
            window.as_ref(),
            bounds,
            WebViewConfig::chrome(CHROME_URL),
        ) {
            tracing::error!(error = %e, "Failed to create chrome view");
        }
    }

    /// Materialize the strip from the registry and pick the starting tab.
    ///
    /// Service views come later, once the catalog has resolved.
    pub(super) fn load_tabs(&mut self) {
        self.strip = TabStrip::materialize(self.registry.services());

        let restored = self
            .config
            .general
            .restore_last_active
            .then(|| self.registry.last_active())
            .flatten()
            .filter(|id| self.registry.get(*id).is_some_and(|s| s.enabled));
        self.active = restored.or_else(|| self.first_enabled());

        tracing::info!(
            services = self.registry.len(),
            active = ?self.active,
            "Tabs loaded"
        );
        self.push_tabs();
        self.update_window_title();
    }

    fn start_runtime(&mut self) {
        match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("rambox-bg")
            .enable_all()
            .build()
        {
            Ok(rt) => self.tokio_runtime = Some(rt),
            Err(e) => tracing::error!(error = %e, "Failed to start background runtime"),
        }
    }
}
