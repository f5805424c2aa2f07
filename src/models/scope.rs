//! Scope target models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of registered scope entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ScopeType {
    Company,
    Wildcard,
    #[serde(rename = "URL")]
    Url,
}

impl ScopeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::Wildcard => "Wildcard",
            Self::Url => "URL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Company" => Some(Self::Company),
            "Wildcard" => Some(Self::Wildcard),
            "URL" => Some(Self::Url),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScopeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered target authorized for reconnaissance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScopeTarget {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub scope_type: ScopeType,
    pub scope_target: String,
    pub created_at: DateTime<Utc>,
}

/// Request to register a scope target.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateScopeTargetRequest {
    #[serde(rename = "type")]
    pub scope_type: ScopeType,
    pub scope_target: String,
}
