//! Scope validation: a scan may only target registered URL scope entries.

use uuid::Uuid;

use crate::db::ScopeRegistry;
use crate::error::AppError;
use crate::models::ScopeType;

/// Why a target was refused.
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("URL '{0}' is not registered as a URL scope target")]
    NotFound(String),

    #[error("URL '{target}' belongs to scope target {actual}, not {claimed}")]
    Mismatch {
        target: String,
        claimed: Uuid,
        actual: Uuid,
    },

    /// The registry itself failed.
    #[error(transparent)]
    Lookup(#[from] AppError),
}

impl From<ScopeError> for AppError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::Lookup(inner) => inner,
            other => AppError::InvalidInput(other.to_string()),
        }
    }
}

/// Resolve `target` to the id of its `URL` scope entry.
///
/// When `claimed` is given it must be the entry that was found.
pub async fn validate_target(
    registry: &dyn ScopeRegistry,
    target: &str,
    claimed: Option<Uuid>,
) -> Result<Uuid, ScopeError> {
    let found = registry
        .lookup(target, ScopeType::Url)
        .await?
        .ok_or_else(|| ScopeError::NotFound(target.to_string()))?;

    match claimed {
        Some(claimed) if claimed != found => Err(ScopeError::Mismatch {
            target: target.to_string(),
            claimed,
            actual: found,
        }),
        _ => Ok(found),
    }
}
