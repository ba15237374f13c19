//! Unread relay: counts reported by service pages, title-derived counts,
//! and host-raised notifications for services that need them.

use rambox_common::{Event, ServiceId};
use rambox_platform::NativeNotification;
use rambox_services::{manual_notification, parse_title_unread, NotificationContext, UnreadCount};
use rambox_webview::ipc::PageNotification;
use rambox_webview::{uses_title_unread, ServiceMessage};

use super::core::RamboxApp;

impl RamboxApp {
    pub(super) fn handle_service_message(&mut self, id: ServiceId, message: ServiceMessage) {
        match message {
            ServiceMessage::SetUnreadCount(payload) => self.apply_unread(id, payload.count),
            ServiceMessage::ClearUnreadCount => self.apply_unread(id, UnreadCount::ZERO),
            ServiceMessage::ShowWindowAndActivateTab => self.show_window_and_activate(id),
            ServiceMessage::Notification(page) => {
                if let Some(n) = self.page_notification(id, page) {
                    self.raise(id, &n);
                }
            }
        }
    }

    /// Whether the host may raise anything for a service with the given
    /// `notifications` flag.
    fn host_may_notify(&self, notifications: bool) -> bool {
        notifications && self.config.notifications.enabled && !self.config.general.dont_disturb
    }

    /// The OS notification for a page notification the web view could not
    /// show, or `None` when it should stay quiet.
    pub(super) fn page_notification(
        &self,
        id: ServiceId,
        page: PageNotification,
    ) -> Option<NativeNotification> {
        let service = self.registry.get(id)?;
        if !service.enabled || !self.host_may_notify(service.notifications) {
            return None;
        }
        let title = if page.title.trim().is_empty() {
            service.name.clone()
        } else {
            page.title
        };
        Some(NativeNotification::new(title, page.body).silent(page.silent || service.muted))
    }

    fn raise(&self, id: ServiceId, notification: &NativeNotification) {
        if let Err(e) = rambox_platform::notify(notification) {
            tracing::warn!(service_id = %id, error = %e, "notification failed");
        }
    }

    /// Record a count and work out whether the host should notify.
    ///
    /// Only touches state, so it can run without a window.
    pub(super) fn record_unread(
        &mut self,
        id: ServiceId,
        count: UnreadCount,
    ) -> Option<NativeNotification> {
        let service = self.registry.get(id)?;
        let change = self.unread.set(service, count);

        let manual = self
            .catalog
            .as_ref()
            .and_then(|c| c.get(&service.service_type))
            .is_some_and(|e| e.manual_notifications);
        let ctx = NotificationContext {
            manual_notifications: manual,
            dont_disturb: !self.host_may_notify(true),
        };
        manual_notification(ctx, service, change.previous, change.current)
    }

    fn apply_unread(&mut self, id: ServiceId, count: UnreadCount) {
        let notification = self.record_unread(id, count);
        tracing::debug!(service_id = %id, ?count, total = self.unread.total(), "unread updated");

        if let Some(n) = notification {
            self.raise(id, &n);
        }

        self.event_bus.publish(Event::UnreadChanged {
            total: self.unread.total(),
        });
        self.push_badges();
        self.update_window_title();
    }

    /// A page notification was clicked: bring the window up on that tab.
    fn show_window_and_activate(&mut self, id: ServiceId) {
        if let Some(ref window) = self.window {
            window.set_visible(true);
            window.set_minimized(false);
            window.focus_window();
        }
        self.activate_tab(id);
    }

    /// Fall back to the `(N) Title` convention for services without any
    /// unread script.
    pub(super) fn handle_title_changed(&mut self, id: ServiceId, title: &str) {
        let Some(service) = self.registry.get(id) else {
            return;
        };
        let catalog_js = self
            .catalog
            .as_ref()
            .and_then(|c| c.get(&service.service_type))
            .map(|e| e.js_unread.as_str())
            .unwrap_or_default();
        if !uses_title_unread(catalog_js, &service.js_unread) {
            return;
        }

        let count = parse_title_unread(title);
        if count != self.unread.count(id) {
            self.apply_unread(id, count);
        }
    }
}
