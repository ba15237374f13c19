//! Notification wording and the manual-notification rule.
//!
//! Some services never raise web notifications themselves; their catalog
//! entry sets `manual_notifications` and the host raises one whenever the
//! unread count goes up.

use rambox_platform::NativeNotification;

use crate::model::{Service, ServiceKind};
use crate::unread::UnreadCount;

/// Inputs to the manual-notification rule that don't live on the service.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationContext {
    /// The service's catalog entry asks the host to notify on increases.
    pub manual_notifications: bool,
    pub dont_disturb: bool,
}

pub fn notification_noun(kind: ServiceKind, count: u32) -> &'static str {
    let plural = count != 1;
    match (kind, plural) {
        (ServiceKind::Messaging, false) => "new message",
        (ServiceKind::Messaging, true) => "new messages",
        (ServiceKind::Email, false) => "new email",
        (ServiceKind::Email, true) => "new emails",
        (ServiceKind::Other, false) => "new activity",
        (ServiceKind::Other, true) => "new activities",
    }
}

pub fn notification_body(kind: ServiceKind, count: u32) -> String {
    format!("You have {count} {}.", notification_noun(kind, count))
}

/// The OS notification for `count` unread items on `service`. Muted
/// services get a silent one.
pub fn notification_for(service: &Service, count: u32) -> NativeNotification {
    NativeNotification::new(&service.name, notification_body(service.kind, count))
        .silent(service.muted)
}

/// Should the host raise a notification for this count change?
///
/// Only strict increases between two known counts qualify.
pub fn should_notify(
    ctx: NotificationContext,
    service: &Service,
    previous: UnreadCount,
    current: UnreadCount,
) -> bool {
    if !ctx.manual_notifications || ctx.dont_disturb || !service.notifications {
        return false;
    }
    matches!(
        (previous, current),
        (UnreadCount::Exact(before), UnreadCount::Exact(now)) if now > before
    )
}

/// Apply the rule and build the notification in one step.
pub fn manual_notification(
    ctx: NotificationContext,
    service: &Service,
    previous: UnreadCount,
    current: UnreadCount,
) -> Option<NativeNotification> {
    if !should_notify(ctx, service, previous, current) {
        return None;
    }
    current.value().map(|n| notification_for(service, n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewService;
    use rambox_common::ServiceId;

    fn service(kind: ServiceKind) -> Service {
        NewService::new("hangouts", "Hangouts", "https://hangouts.google.com/")
            .kind(kind)
            .into_service(ServiceId(1))
    }

    const MANUAL: NotificationContext = NotificationContext {
        manual_notifications: true,
        dont_disturb: false,
    };

    #[test]
    fn email_wording() {
        assert!(notification_body(ServiceKind::Email, 1).contains("new email."));
        assert!(notification_body(ServiceKind::Email, 2).contains("new emails"));
        assert_eq!(
            notification_body(ServiceKind::Email, 1),
            "You have 1 new email."
        );
    }

    #[test]
    fn messaging_wording() {
        assert_eq!(
            notification_body(ServiceKind::Messaging, 1),
            "You have 1 new message."
        );
        assert_eq!(
            notification_body(ServiceKind::Messaging, 4),
            "You have 4 new messages."
        );
    }

    #[test]
    fn other_wording() {
        assert_eq!(
            notification_body(ServiceKind::Other, 1),
            "You have 1 new activity."
        );
        assert_eq!(
            notification_body(ServiceKind::Other, 3),
            "You have 3 new activities."
        );
    }

    #[test]
    fn muted_service_gets_silent_notification() {
        let mut s = service(ServiceKind::Messaging);
        s.muted = true;
        let n = notification_for(&s, 2);
        assert!(n.silent);
        assert_eq!(n.title, "Hangouts");

        s.muted = false;
        assert!(!notification_for(&s, 2).silent);
    }

    #[test]
    fn notifies_only_on_increase() {
        let s = service(ServiceKind::Messaging);
        assert!(should_notify(MANUAL, &s, UnreadCount::Exact(1), UnreadCount::Exact(2)));
        assert!(!should_notify(MANUAL, &s, UnreadCount::Exact(2), UnreadCount::Exact(2)));
        assert!(!should_notify(MANUAL, &s, UnreadCount::Exact(3), UnreadCount::Exact(1)));
        assert!(!should_notify(MANUAL, &s, UnreadCount::Exact(0), UnreadCount::Unknown));
        assert!(!should_notify(MANUAL, &s, UnreadCount::Unknown, UnreadCount::Exact(4)));
    }

    #[test]
    fn never_under_dont_disturb() {
        let s = service(ServiceKind::Messaging);
        let ctx = NotificationContext {
            dont_disturb: true,
            ..MANUAL
        };
        assert!(!should_notify(ctx, &s, UnreadCount::Exact(0), UnreadCount::Exact(5)));
    }

    #[test]
    fn requires_manual_flag_and_service_notifications() {
        let mut s = service(ServiceKind::Messaging);
        let auto = NotificationContext::default();
        assert!(!should_notify(auto, &s, UnreadCount::Exact(0), UnreadCount::Exact(1)));

        s.notifications = false;
        assert!(!should_notify(MANUAL, &s, UnreadCount::Exact(0), UnreadCount::Exact(1)));
    }

    #[test]
    fn manual_notification_builds_body_from_new_count() {
        let s = service(ServiceKind::Email);
        let n = manual_notification(MANUAL, &s, UnreadCount::Exact(1), UnreadCount::Exact(3))
            .unwrap();
        assert_eq!(n.body, "You have 3 new emails.");
        assert!(manual_notification(MANUAL, &s, UnreadCount::Exact(3), UnreadCount::Exact(3))
            .is_none());
    }
}
