//! Fuzzer configuration document stored per scope target.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// Full ffuf configuration as edited by operators.
///
/// Every field is optional on the wire. Only `wordlist_id`, `threads` and
/// `match_status_codes` currently shape the scan invocation; the rest is
/// persisted for the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FuzzConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub headers: Vec<HashMap<String, String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub cookies: String,
    #[serde(deserialize_with = "null_as_default")]
    pub post_data: String,
    #[serde(deserialize_with = "null_as_default")]
    pub http2: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub follow_redirects: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub timeout: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub wordlist_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_wordlist: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wordlist_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub extensions: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keyword: String,
    #[serde(deserialize_with = "null_as_default")]
    pub match_status_codes: String,
    #[serde(deserialize_with = "null_as_default")]
    pub match_lines: String,
    #[serde(deserialize_with = "null_as_default")]
    pub match_size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub match_words: String,
    #[serde(deserialize_with = "null_as_default")]
    pub match_regex: String,
    #[serde(deserialize_with = "null_as_default")]
    pub matcher_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub filter_status_codes: String,
    #[serde(deserialize_with = "null_as_default")]
    pub filter_lines: String,
    #[serde(deserialize_with = "null_as_default")]
    pub filter_size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub filter_words: String,
    #[serde(deserialize_with = "null_as_default")]
    pub filter_regex: String,
    #[serde(deserialize_with = "null_as_default")]
    pub filter_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub threads: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub rate_limit: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub delay: String,
    #[serde(deserialize_with = "null_as_default")]
    pub max_time: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub verbose: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub auto_calibrate: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub recursion: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub recursion_depth: i32,
    #[serde(rename = "proxyURL", deserialize_with = "null_as_default")]
    pub proxy_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub client_cert: String,
    #[serde(deserialize_with = "null_as_default")]
    pub client_key: String,
}

impl FuzzConfig {
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or_else(|_| JsonValue::Object(Default::default()))
    }
}

/// Decode an explicit `null` the same as an absent key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parameters that feed the ffuf invocation after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFuzzParams {
    pub wordlist_path: String,
    pub threads: u32,
    pub match_status_codes: String,
}
