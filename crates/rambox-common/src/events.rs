use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::ServiceId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    ServiceAdded(ServiceId),
    ServiceRemoved(ServiceId),
    ServiceUpdated(ServiceId),
    TabActivated(ServiceId),
    UnreadChanged { total: u32 },
    DontDisturbChanged(bool),
    UpdateAvailable { version: String },
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::ServiceAdded(ServiceId(3)));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::ServiceAdded(ServiceId(3))));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Event::Shutdown);

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert!(matches!(e1, Event::Shutdown));
        assert!(matches!(e2, Event::Shutdown));
    }

    #[tokio::test]
    async fn service_lifecycle_events_keep_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let id = ServiceId(1);

        bus.publish(Event::ServiceAdded(id));
        bus.publish(Event::TabActivated(id));
        bus.publish(Event::ServiceRemoved(id));

        let e1 = rx.recv().await.unwrap();
        assert!(matches!(e1, Event::ServiceAdded(i) if i == ServiceId(1)));

        let e2 = rx.recv().await.unwrap();
        assert!(matches!(e2, Event::TabActivated(i) if i == ServiceId(1)));

        let e3 = rx.recv().await.unwrap();
        assert!(matches!(e3, Event::ServiceRemoved(i) if i == ServiceId(1)));
    }

    #[tokio::test]
    async fn unread_and_update_events() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::UnreadChanged { total: 4 });
        bus.publish(Event::UpdateAvailable {
            version: "1.2.0".into(),
        });
        bus.publish(Event::DontDisturbChanged(true));

        let e1 = rx.recv().await.unwrap();
        assert!(matches!(e1, Event::UnreadChanged { total: 4 }));

        let e2 = rx.recv().await.unwrap();
        assert!(matches!(e2, Event::UpdateAvailable { ref version } if version == "1.2.0"));

        let e3 = rx.recv().await.unwrap();
        assert!(matches!(e3, Event::DontDisturbChanged(true)));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        let count = bus.publish(Event::Shutdown);
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn publish_returns_subscriber_count() {
        let bus = EventBus::new(16);
        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();

        let count = bus.publish(Event::TabActivated(ServiceId(1)));
        assert_eq!(count, 2);
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomeNewEventWeNeverHeardOf","data":null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(matches!(event, Event::Unknown));
    }
}
