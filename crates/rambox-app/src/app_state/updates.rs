//! Background update checks and the install hand-off.

use std::sync::mpsc;
use std::time::Duration;

use rambox_common::Event;
use rambox_webview::ipc::ToastLevel;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::updater::{download_package, UpdateChecker, UpdateEvent};

use super::core::RamboxApp;
use super::types::MIN_UPDATE_INTERVAL;

/// Time between checks: the configured seconds, never under the floor.
pub(super) fn check_period(interval_secs: u32) -> Duration {
    Duration::from_secs(u64::from(interval_secs)).max(MIN_UPDATE_INTERVAL)
}

/// Wait out one check period. Other bus traffic is skipped; returns false
/// as soon as shutdown is published or the bus closes.
pub(super) async fn wait_for_next_check(
    period: Duration,
    bus: &mut broadcast::Receiver<Event>,
) -> bool {
    let sleep = tokio::time::sleep(period);
    tokio::pin!(sleep);
    loop {
        tokio::select! {
            _ = &mut sleep => return true,
            event = bus.recv() => match event {
                Ok(Event::Shutdown) | Err(RecvError::Closed) => return false,
                Ok(_) | Err(RecvError::Lagged(_)) => {}
            },
        }
    }
}

impl RamboxApp {
    fn update_sender(&mut self) -> mpsc::Sender<UpdateEvent> {
        if let Some(ref tx) = self.update_tx {
            return tx.clone();
        }
        let (tx, rx) = mpsc::channel();
        self.update_tx = Some(tx.clone());
        self.update_rx = Some(rx);
        tx
    }

    /// Check now, then every `check_interval` seconds, until shutdown.
    pub(super) fn start_update_checks(&mut self) {
        if !self.check_updates || !self.config.updates.check_automatically {
            tracing::info!("Automatic update checks disabled");
            return;
        }
        if self.tokio_runtime.is_none() {
            tracing::warn!("No async runtime, update checks skipped");
            return;
        }

        let checker = UpdateChecker::new(
            self.config.updates.endpoint.clone(),
            self.config.updates.channel.as_str(),
        );
        let period = check_period(self.config.updates.check_interval);
        let tx = self.update_sender();
        let mut shutdown = self.event_bus.subscribe();

        tracing::info!(url = %checker.url(), ?period, "Starting update checks");
        let Some(ref rt) = self.tokio_runtime else {
            return;
        };
        rt.spawn(async move {
            loop {
                if let Some(release) = checker.check().await {
                    if tx.send(UpdateEvent::Available(release)).is_err() {
                        break;
                    }
                }
                if !wait_for_next_check(period, &mut shutdown).await {
                    break;
                }
            }
            tracing::debug!("Update check task stopped");
        });
    }

    /// Download the pending release in the background.
    pub(super) fn install_update(&mut self) {
        let Some(release) = self.pending_update.clone() else {
            tracing::warn!("Install requested without a pending update");
            return;
        };
        let dir = match rambox_platform::updates_dir() {
            Ok(d) => d,
            Err(e) => {
                self.toast(ToastLevel::Error, format!("Update failed: {e}"));
                return;
            }
        };
        let tx = self.update_sender();
        let Some(ref rt) = self.tokio_runtime else {
            self.toast(ToastLevel::Error, "Update failed: no background runtime");
            return;
        };

        tracing::info!(version = %release.name, "Downloading update");
        self.toast(ToastLevel::Info, format!("Downloading Rambox {}...", release.name));
        rt.spawn(async move {
            let event = match download_package(&release, &dir).await {
                Ok(path) => UpdateEvent::Downloaded(path),
                Err(e) => UpdateEvent::Failed(e.to_string()),
            };
            let _ = tx.send(event);
        });
    }

    /// Drain results from the update tasks.
    pub(super) fn poll_updates(&mut self) {
        let events: Vec<UpdateEvent> = match self.update_rx {
            Some(ref rx) => rx.try_iter().collect(),
            None => return,
        };
        for event in events {
            self.handle_update_event(event);
        }
    }

    pub(super) fn handle_update_event(&mut self, event: UpdateEvent) {
        match event {
            UpdateEvent::Available(release) => {
                let already_known = self
                    .pending_update
                    .as_ref()
                    .is_some_and(|p| p.name == release.name);
                if already_known {
                    return;
                }
                tracing::info!(version = %release.name, "Update available");
                self.event_bus.publish(Event::UpdateAvailable {
                    version: release.name.clone(),
                });
                self.pending_update = Some(release);
                self.push_update();
            }
            UpdateEvent::Downloaded(path) => {
                tracing::info!(path = %path.display(), "Update downloaded, launching installer");
                match rambox_platform::launch_package(&path) {
                    Ok(()) => {
                        self.shutdown();
                        self.should_exit = true;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to launch installer");
                        self.toast(ToastLevel::Error, format!("Could not start the installer: {e}"));
                    }
                }
            }
            UpdateEvent::Failed(reason) => {
                tracing::warn!(%reason, "Update download failed");
                self.toast(ToastLevel::Error, format!("Update failed: {reason}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::core::test_support::app;
    use crate::updater::UpdateRelease;

    fn release(name: &str) -> UpdateRelease {
        UpdateRelease {
            name: name.into(),
            url: "https://updates.example/rambox.dmg".into(),
            notes: Some("Fixes".into()),
            pub_date: None,
        }
    }

    #[test]
    fn period_has_a_floor() {
        assert_eq!(check_period(0), MIN_UPDATE_INTERVAL);
        assert_eq!(check_period(60), MIN_UPDATE_INTERVAL);
        assert_eq!(check_period(86_400), Duration::from_secs(86_400));
    }

    #[tokio::test]
    async fn other_bus_events_do_not_end_the_wait() {
        let bus = rambox_common::EventBus::new(16);
        let mut rx = bus.subscribe();
        for total in 1..=5 {
            bus.publish(Event::UnreadChanged { total });
        }
        bus.publish(Event::TabActivated(rambox_common::ServiceId(1)));

        let waited = tokio::time::timeout(
            Duration::from_millis(50),
            wait_for_next_check(Duration::from_secs(3600), &mut rx),
        )
        .await;
        assert!(waited.is_err(), "the period must not end early");
    }

    #[tokio::test]
    async fn wait_ends_when_period_elapses() {
        let bus = rambox_common::EventBus::new(16);
        let mut rx = bus.subscribe();
        bus.publish(Event::UnreadChanged { total: 2 });
        assert!(wait_for_next_check(Duration::from_millis(10), &mut rx).await);
    }

    #[tokio::test]
    async fn shutdown_or_closed_bus_stops_the_wait() {
        let bus = rambox_common::EventBus::new(16);
        let mut rx = bus.subscribe();
        bus.publish(Event::UnreadChanged { total: 1 });
        bus.publish(Event::Shutdown);
        assert!(!wait_for_next_check(Duration::from_secs(3600), &mut rx).await);

        let mut orphan = bus.subscribe();
        drop(bus);
        assert!(!wait_for_next_check(Duration::from_secs(3600), &mut orphan).await);
    }

    #[test]
    fn checks_skipped_when_disabled() {
        let (fresh, _dir) = app();
        let mut by_flag = fresh.with_update_checks(false);
        by_flag.start_update_checks();
        assert!(by_flag.update_rx.is_none());

        let (mut by_config, _dir2) = app();
        by_config.config.updates.check_automatically = false;
        by_config.start_update_checks();
        assert!(by_config.update_rx.is_none());
    }

    #[test]
    fn available_release_is_remembered_once() {
        let (mut app, _dir) = app();
        let mut bus = app.event_bus.subscribe();

        app.handle_update_event(UpdateEvent::Available(release("0.9.0")));
        app.handle_update_event(UpdateEvent::Available(release("0.9.0")));
        assert_eq!(app.pending_update.as_ref().map(|r| r.name.as_str()), Some("0.9.0"));

        assert!(matches!(bus.try_recv(), Ok(Event::UpdateAvailable { .. })));
        assert!(bus.try_recv().is_err());
    }

    #[test]
    fn polled_events_are_handled() {
        let (mut app, _dir) = app();
        let tx = app.update_sender();
        tx.send(UpdateEvent::Available(release("1.0.0"))).unwrap();
        tx.send(UpdateEvent::Failed("disk full".into())).unwrap();

        app.poll_updates();
        assert!(app.pending_update.is_some());
        assert!(!app.should_exit);
    }

    #[test]
    fn install_without_pending_update_is_ignored() {
        let (mut app, _dir) = app();
        app.install_update();
        assert!(app.update_rx.is_none());
    }
}
