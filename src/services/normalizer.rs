//! Converts raw tool output into the stored result shape.

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::fuzz_config::null_as_default;
use crate::models::{FuzzEndpoint, FuzzResults, ScanPayload};

/// Fuzzer output could not be turned into a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("failed to read results file")]
    ReportUnreadable,

    #[error("failed to parse results")]
    ReportMalformed,
}

/// Line-list tools keep their stdout verbatim.
pub fn normalize_lines(stdout: String) -> ScanPayload {
    ScanPayload::Text(stdout)
}

// Absent or null fields read as zero values.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FfufReport {
    #[serde(deserialize_with = "null_as_default")]
    results: Vec<FfufResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FfufResult {
    #[serde(deserialize_with = "null_as_default")]
    input: HashMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    status: i64,
    #[serde(deserialize_with = "null_as_default")]
    length: i64,
    #[serde(deserialize_with = "null_as_default")]
    words: i64,
    #[serde(deserialize_with = "null_as_default")]
    lines: i64,
}

/// Parse an ffuf JSON report into endpoint records.
pub fn parse_fuzz_report(raw: &str) -> Result<FuzzResults, NormalizeError> {
    let report: FfufReport = serde_json::from_str(raw).map_err(|e| {
        tracing::debug!("ffuf report did not parse: {}", e);
        NormalizeError::ReportMalformed
    })?;

    let endpoints = report
        .results
        .into_iter()
        .map(|r| FuzzEndpoint {
            path: r.input.get("FUZZ").cloned().unwrap_or_default(),
            status: r.status,
            size: r.length,
            words: r.words,
            lines: r.lines,
        })
        .collect();

    Ok(FuzzResults { endpoints })
}
