//! Event-to-WebSocket forwarding.
//!
//! [`GroupNotifier`] subscribes to the event bus and forwards each
//! catalog change event to exactly the WebSocket connections subscribed
//! to the event's group.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use groupwatch_events::GroupEvent;

use crate::ws::WsManager;

/// Forwards group catalog events to subscribed WebSocket clients.
pub struct GroupNotifier {
    ws_manager: Arc<WsManager>,
}

impl GroupNotifier {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the forwarding loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each
    /// event. The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](groupwatch_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<GroupEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.forward(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Group notifier lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, group notifier shutting down");
                    break;
                }
            }
        }
    }

    /// Push one event to every connection that joined its group.
    async fn forward(&self, event: &GroupEvent) {
        let msg = serde_json::json!({
            "type": event.event_type,
            "group_id": event.group_id,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let ws_msg = Message::Text(msg.to_string().into());

        let delivered = self
            .ws_manager
            .send_to_group(&event.group_id, ws_msg)
            .await;
        tracing::debug!(
            group_id = %event.group_id,
            event_type = %event.event_type,
            delivered,
            "Forwarded group event"
        );
    }
}
