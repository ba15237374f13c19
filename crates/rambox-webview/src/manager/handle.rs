use wry::WebView;

/// Handle to a managed WebView instance. Provides methods to interact
/// with the underlying WebView (navigate, evaluate JS, resize, etc.).
pub struct WebViewHandle {
    /// The underlying wry WebView.
    pub(super) webview: WebView,
    /// Service id, or `CHROME_VIEW_ID`.
    pub(super) view_id: u32,
    /// Current URL (best-effort tracking).
    pub(super) current_url: String,
    pub(super) current_title: String,
}

impl WebViewHandle {
    pub fn view_id(&self) -> u32 {
        self.view_id
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    /// Navigate to a URL.
    pub fn load_url(&mut self, url: &str) -> Result<(), wry::Error> {
        self.current_url = url.to_string();
        self.webview.load_url(url)
    }

    /// Reload the current page.
    pub fn reload(&self) -> Result<(), wry::Error> {
        self.webview.evaluate_script("window.location.reload();")
    }

    /// Execute JavaScript in the WebView context.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    pub fn send(&self, message: &crate::ipc::HostMessage) -> Result<(), wry::Error> {
        self.webview.evaluate_script(&message.to_script())
    }

    /// Set the WebView bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn set_visible(&self, visible: bool) -> Result<(), wry::Error> {
        self.webview.set_visible(visible)
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    /// Open the inspector, or close it when already open.
    pub fn toggle_devtools(&self) {
        if self.webview.is_devtools_open() {
            self.webview.close_devtools();
        } else {
            self.webview.open_devtools();
        }
    }

    pub fn go_back(&self) -> Result<(), wry::Error> {
        self.webview.evaluate_script("window.history.back();")
    }

    pub fn go_forward(&self) -> Result<(), wry::Error> {
        self.webview.evaluate_script("window.history.forward();")
    }

    pub fn zoom(&self, scale: f64) -> Result<(), wry::Error> {
        self.webview.zoom(scale)
    }

    /// Update the tracked title.
    pub fn set_title(&mut self, title: String) {
        self.current_title = title;
    }
}
