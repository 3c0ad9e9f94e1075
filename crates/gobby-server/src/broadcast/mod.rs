//! Broadcaster (C11): thread-safe fan-out of selected hook events to
//! WebSocket subscribers.
//!
//! Rust has no equivalent of asyncio's "am I on a loop, whose loop, is it
//! closed" ambiguity — a `tokio::sync::broadcast::Sender` can be cloned and
//! sent from any thread, sync or async, and a `send` on a channel with no
//! receivers simply returns an error rather than panicking. That collapses
//! the three call-site cases spec'd for the original (in a running loop /
//! in a thread holding a loop handle / loop closed or missing) into one
//! code path: a non-blocking `send` that is logged and dropped on failure.

use gobby_domain::value_objects::{HookEvent, HookEventType};
use tokio::sync::broadcast;

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Fans out hook events to any number of WebSocket subscriber tasks.
pub struct Broadcaster {
    sender: broadcast::Sender<HookEvent>,
    events: Vec<HookEventType>,
}

impl Broadcaster {
    /// Builds a broadcaster forwarding only `events` (empty means all).
    #[must_use]
    pub fn new(events: Vec<HookEventType>) -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self { sender, events }
    }

    /// Subscribes a new WebSocket connection to the event stream.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HookEvent> {
        self.sender.subscribe()
    }

    /// `true` if this broadcaster forwards `event_type` at all.
    #[must_use]
    pub fn accepts(&self, event_type: HookEventType) -> bool {
        self.events.is_empty() || self.events.contains(&event_type)
    }

    /// Fans `event` out to all current subscribers, if its type is
    /// configured for broadcast. Never raises: a channel with no
    /// subscribers, or a subscriber that has lagged and been dropped, is
    /// logged at debug level and otherwise ignored.
    pub async fn broadcast_event(&self, event: HookEvent) {
        if !self.accepts(event.event_type) {
            return;
        }
        if let Err(broadcast::error::SendError(event)) = self.sender.send(event) {
            tracing::debug!(event_type = ?event.event_type, "broadcast event dropped, no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(event_type: HookEventType) -> HookEvent {
        HookEvent {
            event_type,
            session_id: "s1".to_owned(),
            source: "test".to_owned(),
            timestamp: "2024-01-01T00:00:00Z".to_owned(),
            data: Default::default(),
            machine_id: None,
        }
    }

    #[tokio::test]
    async fn subscriber_receives_accepted_event() {
        let broadcaster = Broadcaster::new(vec![]);
        let mut rx = broadcaster.subscribe();
        broadcaster.broadcast_event(event(HookEventType::BeforeTool)).await;
        let received = rx.recv().await.unwrap();
        assert_eq!(received.event_type, HookEventType::BeforeTool);
    }

    #[tokio::test]
    async fn filtered_event_type_is_not_sent() {
        let broadcaster = Broadcaster::new(vec![HookEventType::SessionStart]);
        assert!(!broadcaster.accepts(HookEventType::BeforeTool));
    }

    #[tokio::test]
    async fn broadcast_with_no_subscribers_does_not_panic() {
        let broadcaster = Broadcaster::new(vec![]);
        broadcaster.broadcast_event(event(HookEventType::AfterTool)).await;
    }
}
