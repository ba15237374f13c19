//! Local content serving via custom protocol.
//!
//! Registers a `rambox://` custom protocol so the chrome view can load its
//! bundled HTML/JS/CSS without a local HTTP server.

use std::collections::HashMap;

/// Entry point of the chrome view.
pub const CHROME_URL: &str = "rambox://localhost/chrome/index.html";

const CHROME_INDEX_HTML: &str = include_str!("../../../assets/chrome/index.html");
const CHROME_CSS: &str = include_str!("../../../assets/chrome/chrome.css");
const CHROME_JS: &str = include_str!("../../../assets/chrome/chrome.js");

/// Serves the chrome assets compiled into the binary. Anything else is a
/// miss, so there is no path that reaches the filesystem.
pub struct ContentProvider {
    assets: HashMap<&'static str, (&'static str, &'static [u8])>, // path -> (mime, data)
}

impl ContentProvider {
    pub fn embedded() -> Self {
        let assets = HashMap::from([
            ("chrome/index.html", ("text/html", CHROME_INDEX_HTML.as_bytes())),
            ("chrome/chrome.css", ("text/css", CHROME_CSS.as_bytes())),
            (
                "chrome/chrome.js",
                ("application/javascript", CHROME_JS.as_bytes()),
            ),
        ]);
        Self { assets }
    }

    /// Resolve a request path to its MIME type and bytes.
    pub fn resolve(&self, path: &str) -> Option<(&'static str, &'static [u8])> {
        self.assets.get(path.trim_start_matches('/')).copied()
    }
}
