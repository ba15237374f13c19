//! WebView layer for the Rambox window.
//!
//! Wraps the `wry` crate to provide:
//! - One managed WebView per service, plus the chrome (tab strip) view
//! - Typed IPC between the host and both kinds of view
//! - The `rambox://` custom protocol serving the bundled chrome assets
//! - Initialization scripts that relay unread counts and notifications
//! - Navigation and new-window policies per view role

pub mod content;
pub mod events;
pub mod ipc;
pub mod manager;
pub mod scripts;

pub use events::{PageLoadState, WebViewEvent};
pub use ipc::{ChromeMessage, HostMessage, IpcError, IpcMessage, IpcRole, ServiceMessage};
pub use manager::{
    NavigationPolicy, WebViewConfig, WebViewHandle, WebViewManager, WebViewRegistry,
    CHROME_VIEW_ID,
};
pub use scripts::{service_init_script, uses_title_unread, ServiceScriptOptions};
