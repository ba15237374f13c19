use super::handlers::NavigationPolicy;

/// Configuration for creating a new WebView instance.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL to load (mutually exclusive with `html`).
    pub url: Option<String>,
    /// Initial HTML content to render (mutually exclusive with `url`).
    pub html: Option<String>,
    /// Whether dev tools can be opened. Service views always allow it so
    /// the tab menu can toggle them. The chrome only in debug builds.
    pub devtools: bool,
    /// Custom user agent string. `None` keeps the engine default.
    pub user_agent: Option<String>,
    /// Scripts run before any page script, in order, on every navigation.
    pub init_scripts: Vec<String>,
    pub navigation: NavigationPolicy,
    /// Open `window.open` targets in the same view instead of the browser.
    pub allow_popups: bool,
    /// Initial zoom factor.
    pub zoom: f64,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            html: None,
            devtools: cfg!(debug_assertions),
            user_agent: None,
            init_scripts: Vec::new(),
            navigation: NavigationPolicy::Service,
            allow_popups: false,
            zoom: 1.0,
        }
    }
}

impl WebViewConfig {
    /// A service view loading `url`.
    pub fn service(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            devtools: true,
            ..Default::default()
        }
    }

    /// The chrome view loading bundled assets.
    pub fn chrome(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            navigation: NavigationPolicy::Chrome,
            ..Default::default()
        }
    }

    pub fn with_init_script(mut self, script: impl Into<String>) -> Self {
        self.init_scripts.push(script.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent.filter(|ua| !ua.trim().is_empty());
        self
    }

    pub fn with_allow_popups(mut self, allow: bool) -> Self {
        self.allow_popups = allow;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }
}
