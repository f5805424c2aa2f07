//! Resolves the parameters of a fuzzer run from a scope's stored config.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;
use uuid::Uuid;

use crate::db::{FuzzConfigRepository, WordlistRegistry};
use crate::models::ResolvedFuzzParams;
use crate::models::fuzz_config::null_as_default;

pub const DEFAULT_THREADS: u32 = 40;
pub const DEFAULT_MATCH_STATUS_CODES: &str = "200-299,301,302,307,401,403,405,500";

/// The slice of a stored config document that shapes the invocation.
///
/// Other keys are ignored, so a bad value elsewhere in the document does not
/// discard these.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredFuzzParams {
    #[serde(deserialize_with = "null_as_default")]
    wordlist_id: String,
    #[serde(deserialize_with = "null_as_default")]
    threads: i32,
    #[serde(deserialize_with = "null_as_default")]
    match_status_codes: String,
}

impl StoredFuzzParams {
    fn from_json(value: &JsonValue) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Merge the stored config for `scope_target_id` with defaults.
///
/// Never fails: a missing or undecodable document, or a wordlist id that
/// cannot be resolved, all fall back to the defaults.
pub async fn resolve_fuzz_params(
    configs: &dyn FuzzConfigRepository,
    wordlists: &dyn WordlistRegistry,
    scope_target_id: Uuid,
    default_wordlist: &str,
) -> ResolvedFuzzParams {
    let stored = match configs.get_fuzz_config(scope_target_id).await {
        Ok(doc) => doc.as_ref().and_then(StoredFuzzParams::from_json),
        Err(e) => {
            debug!("fuzz config for scope {} unavailable: {}", scope_target_id, e);
            None
        }
    }
    .unwrap_or_default();

    let threads = u32::try_from(stored.threads)
        .ok()
        .filter(|t| *t > 0)
        .unwrap_or(DEFAULT_THREADS);

    let match_status_codes = if stored.match_status_codes.trim().is_empty() {
        DEFAULT_MATCH_STATUS_CODES.to_string()
    } else {
        stored.match_status_codes
    };

    let wordlist_path = match resolve_wordlist(wordlists, &stored.wordlist_id).await {
        Some(path) => path,
        None => default_wordlist.to_string(),
    };

    ResolvedFuzzParams {
        wordlist_path,
        threads,
        match_status_codes,
    }
}

async fn resolve_wordlist(wordlists: &dyn WordlistRegistry, wordlist_id: &str) -> Option<String> {
    if wordlist_id.is_empty() {
        return None;
    }
    let id = Uuid::parse_str(wordlist_id).ok()?;
    wordlists.resolve_wordlist(id).await.ok().flatten()
}
