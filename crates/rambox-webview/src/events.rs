//! WebView event types.

use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by a WebView instance.
///
/// `view_id` is the service id, or `CHROME_VIEW_ID` for the tab strip.
#[derive(Debug, Clone, PartialEq)]
pub enum WebViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad {
        view_id: u32,
        state: PageLoadState,
        url: String,
    },
    /// Document title changed.
    TitleChanged { view_id: u32, title: String },
    /// An IPC message was received from JavaScript.
    IpcMessage { view_id: u32, body: String },
    /// A navigation passed the view's policy.
    NavigationRequested { view_id: u32, url: String },
    /// The page asked for a new window. `external` is true when the URL
    /// was handed to the system browser instead.
    NewWindowRequested {
        view_id: u32,
        url: String,
        external: bool,
    },
    /// WebView was closed / destroyed.
    Closed { view_id: u32 },
}

impl WebViewEvent {
    pub fn view_id(&self) -> u32 {
        match self {
            WebViewEvent::PageLoad { view_id, .. }
            | WebViewEvent::TitleChanged { view_id, .. }
            | WebViewEvent::IpcMessage { view_id, .. }
            | WebViewEvent::NavigationRequested { view_id, .. }
            | WebViewEvent::NewWindowRequested { view_id, .. }
            | WebViewEvent::Closed { view_id } => *view_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_id_of_every_variant() {
        let events = [
            WebViewEvent::PageLoad {
                view_id: 1,
                state: PageLoadState::Started,
                url: "https://a.example".into(),
            },
            WebViewEvent::TitleChanged {
                view_id: 1,
                title: "(2) Inbox".into(),
            },
            WebViewEvent::IpcMessage {
                view_id: 1,
                body: "{}".into(),
            },
            WebViewEvent::NewWindowRequested {
                view_id: 1,
                url: "https://b.example".into(),
                external: true,
            },
            WebViewEvent::Closed { view_id: 1 },
        ];
        assert!(events.iter().all(|e| e.view_id() == 1));
    }
}
