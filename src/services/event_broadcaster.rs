//! Event broadcaster for WebSocket scan updates.
//!
//! Uses tokio::sync::broadcast to fan-out scan lifecycle events to all
//! connected WebSocket clients.

use tokio::sync::broadcast;

use crate::models::{ScanJob, WsEvent, WsEventMessage};

/// Default capacity for the broadcast channel.
const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// Distributes scan events to every subscriber.
#[derive(Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<WsEventMessage>,
}

impl EventBroadcaster {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<WsEventMessage> {
        self.sender.subscribe()
    }

    /// Broadcast an event. Returns the number of receivers reached, 0 when
    /// nobody is listening.
    pub fn send(&self, event: WsEventMessage) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn scan_created(&self, job: &ScanJob) -> usize {
        self.send(WsEventMessage::new(WsEvent::scan_created(job)))
    }

    pub fn scan_updated(&self, job: &ScanJob) -> usize {
        self.send(WsEventMessage::new(WsEvent::scan_updated(job)))
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScanStatus, ScanTool};
    use chrono::Utc;
    use uuid::Uuid;

    fn pending_job() -> ScanJob {
        ScanJob {
            scan_id: Uuid::now_v7(),
            tool: ScanTool::Katana,
            target: "https://example.com".into(),
            scope_target_id: Uuid::new_v4(),
            status: ScanStatus::Pending,
            result: None,
            error_detail: None,
            command: None,
            execution_time_ms: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn test_broadcast_to_multiple_receivers() {
        let broadcaster = EventBroadcaster::new();

        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        assert_eq!(broadcaster.scan_created(&pending_job()), 2);

        assert!(matches!(
            rx1.recv().await.unwrap().event,
            WsEvent::ScanCreated(_)
        ));
        assert!(rx2.recv().await.is_ok());
    }

    #[test]
    fn test_no_subscribers_no_error() {
        let broadcaster = EventBroadcaster::new();
        assert_eq!(broadcaster.scan_updated(&pending_job()), 0);
    }
}
