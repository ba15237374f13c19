use notify_rust::Notification;
use rambox_common::PlatformError;
use tracing::{debug, info};

const APP_NAME: &str = "Rambox";

#[cfg(target_os = "windows")]
const DEFAULT_SOUND: &str = "Default";
#[cfg(not(target_os = "windows"))]
const DEFAULT_SOUND: &str = "default";

/// A native OS notification raised by the host on behalf of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeNotification {
    pub title: String,
    pub body: String,
    /// Suppress the notification sound (muted services).
    pub silent: bool,
}

impl NativeNotification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            silent: false,
        }
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

/// Sends a native notification to the user through the desktop's
/// notification service (D-Bus on Linux and BSD, the notification center on
/// macOS, toasts on Windows).
pub fn notify(notification: &NativeNotification) -> Result<(), PlatformError> {
    debug!(
        silent = notification.silent,
        title_len = notification.title.len(),
        "dispatching native notification"
    );
    build(notification)
        .show()
        .map(|_| ())
        .map_err(|e| PlatformError::NotificationError(format!("failed to show notification: {e}")))?;
    info!("native notification sent");
    Ok(())
}

/// The sound to request, if any. Windows and macOS stay quiet without one.
#[cfg_attr(all(unix, not(target_os = "macos")), allow(dead_code))]
fn sound_name(silent: bool) -> Option<&'static str> {
    (!silent).then_some(DEFAULT_SOUND)
}

fn build(n: &NativeNotification) -> Notification {
    let mut notification = Notification::new();
    notification.appname(APP_NAME).summary(&n.title).body(&n.body);

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        notification.hint(notify_rust::Hint::SuppressSound(n.silent));
    }
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        if let Some(sound) = sound_name(n.silent) {
            notification.sound_name(sound);
        }
    }

    notification
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_audible() {
        let n = NativeNotification::new("Gmail", "You have 1 new email.");
        assert!(!n.silent);
        assert!(n.clone().silent(true).silent);
    }

    #[test]
    fn silent_notifications_request_no_sound() {
        assert_eq!(sound_name(false), Some(DEFAULT_SOUND));
        assert_eq!(sound_name(true), None);
    }

    #[test]
    fn built_notification_carries_text() {
        let n = NativeNotification::new("Slack", "You have 2 new messages.").silent(true);
        let built = build(&n);
        assert_eq!(built.appname, APP_NAME);
        assert_eq!(built.summary, "Slack");
        assert_eq!(built.body, "You have 2 new messages.");
    }

    #[test]
    fn text_is_passed_through_unescaped() {
        let built = build(&NativeNotification::new("Team \"A\"", "--help"));
        assert_eq!(built.summary, "Team \"A\"");
        assert_eq!(built.body, "--help");
    }
}
