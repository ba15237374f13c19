//! Window title management: unread total and active service.

use super::core::RamboxApp;

/// `Rambox (N) - Name`, dropping the count when zero and the name when
/// nothing is active.
pub(super) fn format_window_title(base: &str, total: u32, active_name: Option<&str>) -> String {
    let mut title = base.to_string();
    if total > 0 {
        title.push_str(&format!(" ({total})"));
    }
    if let Some(name) = active_name.filter(|n| !n.is_empty()) {
        title.push_str(" - ");
        title.push_str(name);
    }
    title
}

// =============================================================================
// WINDOW TITLE
// =============================================================================

impl RamboxApp {
    pub(super) fn window_title(&self) -> String {
        let active_name = self
            .active
            .and_then(|id| self.registry.get(id))
            .map(|s| s.name.as_str());
        format_window_title(&self.config.window.title, self.unread.total(), active_name)
    }

    pub(super) fn update_window_title(&self) {
        let Some(ref window) = self.window else {
            return;
        };
        window.set_title(&self.window_title());
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rambox_common::ServiceId;
    use rambox_services::{NewService, UnreadCount};

    use crate::app_state::core::test_support::app_with;

    #[test]
    fn all_four_shapes() {
        assert_eq!(format_window_title("Rambox", 3, Some("Slack")), "Rambox (3) - Slack");
        assert_eq!(format_window_title("Rambox", 0, Some("Slack")), "Rambox - Slack");
        assert_eq!(format_window_title("Rambox", 12, None), "Rambox (12)");
        assert_eq!(format_window_title("Rambox", 0, None), "Rambox");
        assert_eq!(format_window_title("Rambox", 0, Some("")), "Rambox");
    }

    #[test]
    fn title_follows_active_service_and_total() {
        let (mut app, _dir) = app_with(vec![NewService::new("custom", "Wiki", "https://wiki.example/")]);
        assert_eq!(app.window_title(), "Rambox");

        app.activate_tab(ServiceId(1));
        let wiki = app.registry.get(ServiceId(1)).cloned().unwrap();
        app.unread.set(&wiki, UnreadCount::Exact(4));
        assert_eq!(app.window_title(), "Rambox (4) - Wiki");

        // no window: must not panic
        app.update_window_title();
    }
}
