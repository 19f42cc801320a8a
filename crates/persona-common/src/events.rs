use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::TurnId;

/// State changes a conversation session announces to its renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    AttachmentSet {
        name: String,
        mime_type: String,
        size: usize,
    },
    AttachmentCleared,
    AttachmentRejected {
        name: String,
        reason: String,
    },
    TurnStarted {
        turn_id: TurnId,
        text: String,
        attachment: Option<String>,
    },
    TurnCompleted {
        turn_id: TurnId,
        reply: String,
        /// MIME type of an image that came back with the reply.
        #[serde(default)]
        image: Option<String>,
    },
    TurnFailed {
        turn_id: TurnId,
        message: String,
    },
    HistoryTrimmed {
        dropped: usize,
    },
    HistoryCleared,
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

    /// Returns the number of subscribers that received the event.
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

        bus.publish(Event::HistoryCleared);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::HistoryCleared));
    }

    #[tokio::test]
    async fn turn_events_arrive_in_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let turn = TurnId::new();

        bus.publish(Event::TurnStarted {
            turn_id: turn.clone(),
            text: "hello".into(),
            attachment: None,
        });
        bus.publish(Event::AttachmentCleared);
        bus.publish(Event::TurnCompleted {
            turn_id: turn.clone(),
            reply: "hey".into(),
            image: None,
        });

        let e1 = rx.recv().await.unwrap();
        assert!(matches!(e1, Event::TurnStarted { ref text, .. } if text == "hello"));
        assert!(matches!(rx.recv().await.unwrap(), Event::AttachmentCleared));
        let e3 = rx.recv().await.unwrap();
        assert!(matches!(e3, Event::TurnCompleted { ref turn_id, .. } if *turn_id == turn));
    }

    #[tokio::test]
    async fn every_subscriber_sees_failures() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let count = bus.publish(Event::TurnFailed {
            turn_id: TurnId::new(),
            message: "Network error".into(),
        });
        assert_eq!(count, 2);

        assert!(matches!(rx1.recv().await.unwrap(), Event::TurnFailed { .. }));
        assert!(matches!(rx2.recv().await.unwrap(), Event::TurnFailed { .. }));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(Event::AttachmentCleared), 0);
    }

    #[test]
    fn wire_format_is_adjacently_tagged() {
        let json = serde_json::to_value(Event::HistoryTrimmed { dropped: 2 }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "HistoryTrimmed", "data": { "dropped": 2 } })
        );
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomethingNewer","data":null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(matches!(event, Event::Unknown));
    }
}
