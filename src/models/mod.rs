//! Domain models for the recon scan server.

pub mod fuzz_config;
pub mod scan;
pub mod scope;
pub mod wordlist;
pub mod ws_event;

// Re-export commonly used types
pub use fuzz_config::{FuzzConfig, ResolvedFuzzParams};
pub use scan::{
    FuzzEndpoint, FuzzResults, NewScanJob, OutputFormat, ScanJob, ScanOutcome, ScanPayload,
    ScanStatus, ScanTool, StartScanRequest, StartScanResponse,
};
pub use scope::{CreateScopeTargetRequest, ScopeTarget, ScopeType};
pub use wordlist::{StatusResponse, Wordlist};
pub use ws_event::{WsEvent, WsEventMessage};
