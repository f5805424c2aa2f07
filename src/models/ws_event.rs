//! WebSocket event types for real-time scan updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ScanJob, ScanStatus, ScanTool};

/// WebSocket event sent to connected clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum WsEvent {
    /// A scan was accepted and is pending.
    ScanCreated(ScanCreatedPayload),
    /// A scan reached a terminal status.
    ScanUpdated(ScanUpdatedPayload),
}

/// Payload for scan_created event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanCreatedPayload {
    pub scan_id: Uuid,
    pub tool: ScanTool,
    pub scope_target_id: Uuid,
    pub url: String,
    pub status: ScanStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for scan_updated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanUpdatedPayload {
    pub scan_id: Uuid,
    pub tool: ScanTool,
    pub scope_target_id: Uuid,
    pub status: ScanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Wrapper that includes timestamp with every event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsEventMessage {
    #[serde(flatten)]
    pub event: WsEvent,
    pub timestamp: DateTime<Utc>,
}

impl WsEventMessage {
    /// Create a new event message with the current timestamp.
    pub fn new(event: WsEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }
}

impl WsEvent {
    pub fn scan_created(job: &ScanJob) -> Self {
        WsEvent::ScanCreated(ScanCreatedPayload {
            scan_id: job.scan_id,
            tool: job.tool,
            scope_target_id: job.scope_target_id,
            url: job.target.clone(),
            status: job.status,
            created_at: job.created_at,
        })
    }

    pub fn scan_updated(job: &ScanJob) -> Self {
        WsEvent::ScanUpdated(ScanUpdatedPayload {
            scan_id: job.scan_id,
            tool: job.tool,
            scope_target_id: job.scope_target_id,
            status: job.status,
            execution_time_ms: job.execution_time_ms,
            completed_at: job.completed_at,
        })
    }
}
