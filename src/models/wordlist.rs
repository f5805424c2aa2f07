//! Fuzzer wordlist models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// An uploaded wordlist available to the fuzzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Wordlist {
    pub id: Uuid,
    /// Original file name.
    pub name: String,
    /// Path handed to ffuf.
    pub path: String,
    /// Number of entries (newline count).
    pub line_count: i64,
    /// File size in bytes.
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
}

/// Simple status acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}
