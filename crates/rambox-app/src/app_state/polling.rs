//! Polling of web view events and background task results.

use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::RamboxApp;
use super::types::POLL_INTERVAL;

impl RamboxApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events();
            self.poll_catalog();
            self.poll_updates();
        }

        if self.should_exit {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }
}
