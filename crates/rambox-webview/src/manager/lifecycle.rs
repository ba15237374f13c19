use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::ContentProvider;
use crate::ipc::IPC_INIT_SCRIPT;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

/// Strip the `rambox://localhost/` prefix (in its various spellings) from a
/// custom-protocol request URI.
pub(crate) fn protocol_path(uri: &str) -> &str {
    let path = uri
        .strip_prefix("rambox://localhost/")
        .or_else(|| uri.strip_prefix("rambox://localhost"))
        .or_else(|| uri.strip_prefix("rambox:///"))
        .or_else(|| uri.strip_prefix("rambox://"))
        .unwrap_or("");
    // Drop query string and fragment
    path.split(['?', '#']).next().unwrap_or("")
}

fn respond(status: u16, mime: &str, body: Vec<u8>) -> wry::http::Response<Cow<'static, [u8]>> {
    wry::http::Response::builder()
        .status(status)
        .header("Content-Type", mime)
        .header("Access-Control-Allow-Origin", "rambox://localhost")
        .body(Cow::from(body))
        .unwrap_or_else(|e| {
            warn!(error = %e, "custom protocol: failed to build response");
            wry::http::Response::new(Cow::from(Vec::new()))
        })
}

impl WebViewManager {
    /// Create a new WebView as a child of the given window.
    ///
    /// The `window` must implement `raw_window_handle::HasWindowHandle`.
    /// The WebView is positioned at `bounds` within the parent window.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        view_id: u32,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let events = Arc::clone(&self.events);

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_clipboard(true)
            .with_autoplay(true)
            .with_focused(false);

        // IPC bridge first, then role-specific scripts in order
        builder = builder.with_initialization_script(IPC_INIT_SCRIPT);
        for script in &config.init_scripts {
            builder = builder.with_initialization_script(script);
        }

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&events), view_id);
        builder = Self::attach_page_load_handler(builder, Arc::clone(&events), view_id);
        builder = Self::attach_title_handler(builder, Arc::clone(&events), view_id);
        builder = Self::attach_navigation_handler(
            builder,
            Arc::clone(&events),
            view_id,
            config.navigation,
        );
        builder = Self::attach_new_window_handler(
            builder,
            Arc::clone(&events),
            view_id,
            config.navigation,
            config.allow_popups,
        );
        builder = self.attach_custom_protocol(builder);

        let initial_url;
        if let Some(url) = &config.url {
            builder = builder.with_url(url);
            initial_url = url.clone();
        } else if let Some(html) = &config.html {
            builder = builder.with_html(html);
            initial_url = "about:blank".to_string();
        } else {
            builder = builder.with_html("<html><body></body></html>");
            initial_url = "about:blank".to_string();
        }

        let webview = builder.build_as_child(window)?;

        if (config.zoom - 1.0).abs() > f64::EPSILON {
            if let Err(e) = webview.zoom(config.zoom) {
                warn!(view_id, error = %e, "failed to apply initial zoom");
            }
        }

        debug!(view_id, url = %initial_url, "WebView created");

        Ok(WebViewHandle {
            webview,
            view_id,
            current_url: initial_url,
            current_title: String::new(),
        })
    }

    /// Set the content provider for serving bundled assets via `rambox://`.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    fn attach_custom_protocol<'a>(&self, mut builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        if let Some(provider) = &self.content_provider {
            let cp = Arc::clone(provider);
            builder = builder.with_custom_protocol("rambox".to_string(), move |_wv_id, request| {
                let uri = request.uri().to_string();
                let path = protocol_path(&uri);

                match cp.resolve(path) {
                    Some((mime, data)) => respond(200, mime, data.to_vec()),
                    None => {
                        warn!(path = %path, "custom protocol: asset not found");
                        respond(404, "text/plain", b"Not Found".to_vec())
                    }
                }
            });
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_path_variants() {
        assert_eq!(
            protocol_path("rambox://localhost/chrome/index.html"),
            "chrome/index.html"
        );
        assert_eq!(protocol_path("rambox:///chrome/chrome.js"), "chrome/chrome.js");
        assert_eq!(protocol_path("rambox://chrome/chrome.css"), "chrome/chrome.css");
        assert_eq!(protocol_path("https://other.example/"), "");
    }

    #[test]
    fn protocol_path_drops_query_and_fragment() {
        assert_eq!(
            protocol_path("rambox://localhost/chrome/index.html?v=2#top"),
            "chrome/index.html"
        );
    }
}
