//! In-process event bus backed by a `tokio::sync::broadcast` channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event type for a successful content addition. Payload: the resolved
/// metadata of the added title.
pub const CONTENT_ADDED: &str = "content-added";

/// Event type for a content removal. Payload: `{id, title, type}`.
pub const CONTENT_REMOVED: &str = "content-removed";

/// A catalog change event, scoped to one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEvent {
    /// The group whose catalog changed.
    pub group_id: String,

    /// Event name: [`CONTENT_ADDED`] or [`CONTENT_REMOVED`].
    pub event_type: String,

    /// Event-specific JSON payload.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl GroupEvent {
    /// Create a new event for a group.
    pub fn new(
        group_id: impl Into<String>,
        event_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            event_type: event_type.into(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers can
/// independently receive every published [`GroupEvent`]. Designed to be
/// shared via `Arc<EventBus>`.
pub struct EventBus {
    sender: broadcast::Sender<GroupEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are
    /// dropped and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped; delivery is
    /// best-effort.
    pub fn publish(&self, event: GroupEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<GroupEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = GroupEvent::new(
            "ab12cd34",
            CONTENT_ADDED,
            serde_json::json!({"title": "The Shawshank Redemption", "type": "movie"}),
        );
        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.group_id, "ab12cd34");
        assert_eq!(received.event_type, CONTENT_ADDED);
        assert_eq!(received.payload["title"], "The Shawshank Redemption");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(GroupEvent::new(
            "ab12cd34",
            CONTENT_REMOVED,
            serde_json::json!({"id": 7, "title": "Heat", "type": "movie"}),
        ));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1.event_type, CONTENT_REMOVED);
        assert_eq!(e2.payload["id"], 7);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(GroupEvent::new("orphan", CONTENT_ADDED, serde_json::json!({})));
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let bus = EventBus::default();
        bus.publish(GroupEvent::new("ab12cd34", CONTENT_ADDED, serde_json::json!({})));

        // Subscribed after the publish: nothing to receive.
        let mut rx = bus.subscribe();
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }
}
