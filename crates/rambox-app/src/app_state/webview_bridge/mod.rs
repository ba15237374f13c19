//! Bridge between the app state and the web views.
//!
//! Handles window layout, view creation and visibility, IPC dispatch for
//! both view roles, and pushing state into the chrome.

mod bounds;
mod chrome;
mod ipc_dispatch;
mod lifecycle;
