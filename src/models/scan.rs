//! Scan job domain models and DTOs.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Reconnaissance tool a scan runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScanTool {
    /// Katana web crawler.
    Katana,
    /// LinkFinder endpoint extractor.
    LinkFinder,
    /// waybackurls archive fetcher.
    WaybackUrls,
    /// GetAllUrls archive fetcher.
    Gau,
    /// ffuf content fuzzer.
    Ffuf,
}

/// How a tool's output is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One artifact URL per stdout line, stored verbatim.
    LineList,
    /// JSON report file parsed into endpoint records.
    FuzzReport,
}

impl ScanTool {
    pub const ALL: [ScanTool; 5] = [
        Self::Katana,
        Self::LinkFinder,
        Self::WaybackUrls,
        Self::Gau,
        Self::Ffuf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Katana => "katana",
            Self::LinkFinder => "linkfinder",
            Self::WaybackUrls => "waybackurls",
            Self::Gau => "gau",
            Self::Ffuf => "ffuf",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "katana" => Some(Self::Katana),
            "linkfinder" => Some(Self::LinkFinder),
            "waybackurls" => Some(Self::WaybackUrls),
            "gau" => Some(Self::Gau),
            "ffuf" => Some(Self::Ffuf),
            _ => None,
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        match self {
            Self::Ffuf => OutputFormat::FuzzReport,
            _ => OutputFormat::LineList,
        }
    }

    /// Whether a scan request must name the scope target it belongs to.
    pub fn requires_scope_claim(&self) -> bool {
        matches!(self, Self::Ffuf)
    }
}

impl std::fmt::Display for ScanTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scan job status.
///
/// `Pending` is the only non-terminal state; a job leaves it exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    /// Created, tool not finished yet.
    Pending,
    /// Tool exited cleanly and output was normalized.
    Success,
    /// Tool failed or its output could not be normalized.
    Error,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One endpoint discovered by the fuzzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FuzzEndpoint {
    /// Value substituted for the FUZZ keyword.
    pub path: String,
    /// HTTP status code.
    pub status: i64,
    /// Response size in bytes.
    pub size: i64,
    pub words: i64,
    pub lines: i64,
}

/// Normalized fuzzer output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FuzzResults {
    pub endpoints: Vec<FuzzEndpoint>,
}

/// Normalized scan result stored on a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ScanPayload {
    /// Raw stdout of a line-list tool.
    Text(String),
    /// Parsed fuzzer report.
    Endpoints(FuzzResults),
}

/// Scan job record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScanJob {
    pub scan_id: Uuid,
    pub tool: ScanTool,
    /// Scoped URL the tool ran against.
    #[serde(rename = "url")]
    pub target: String,
    pub scope_target_id: Uuid,
    pub status: ScanStatus,
    /// Normalized output, null until the job is terminal.
    pub result: Option<ScanPayload>,
    /// Failure text, present only when status is `error`.
    #[serde(rename = "error")]
    pub error_detail: Option<String>,
    /// Literal tool invocation.
    pub command: Option<String>,
    /// Subprocess wall-clock time in milliseconds.
    pub execution_time_ms: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Values for inserting a pending scan job.
#[derive(Debug, Clone)]
pub struct NewScanJob {
    pub scan_id: Uuid,
    pub tool: ScanTool,
    pub target: String,
    pub scope_target_id: Uuid,
}

/// The single terminal update of a scan job.
///
/// Only constructible in a terminal status.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    status: ScanStatus,
    pub result: Option<ScanPayload>,
    pub error_detail: Option<String>,
    pub command: String,
    pub execution_time_ms: i64,
}

impl ScanOutcome {
    pub fn success(result: ScanPayload, command: String, elapsed: Duration) -> Self {
        Self {
            status: ScanStatus::Success,
            result: Some(result),
            error_detail: None,
            command,
            execution_time_ms: duration_ms(elapsed),
        }
    }

    pub fn failure(detail: impl Into<String>, command: String, elapsed: Duration) -> Self {
        Self {
            status: ScanStatus::Error,
            result: None,
            error_detail: Some(detail.into()),
            command,
            execution_time_ms: duration_ms(elapsed),
        }
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }
}

fn duration_ms(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
}

/// Request to start a scan.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct StartScanRequest {
    /// Target URL; must be registered as a URL scope target.
    pub url: String,
    /// Owning scope target (required for ffuf).
    #[serde(default)]
    pub scope_target_id: Option<Uuid>,
}

/// Response after a scan was accepted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartScanResponse {
    pub scan_id: Uuid,
}
