//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Coordinates config, the service registry, the chrome and
//! service web views, unread relaying, and background tasks.

mod catalog;
mod core;
mod event_handler;
mod init;
mod polling;
mod relay;
mod services;
mod shutdown;
mod title;
mod types;
mod updates;
mod webview_bridge;

pub use core::RamboxApp;
