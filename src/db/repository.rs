//! Storage traits consumed by the scan services.
//!
//! `DbPool` implements every trait against PostgreSQL; `MemoryStore`
//! implements them in-process so controllers can be exercised without a
//! database.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    FuzzConfig, NewScanJob, ScanJob, ScanOutcome, ScanTool, ScopeTarget, ScopeType, Wordlist,
};

/// Durable scan job records.
#[async_trait]
pub trait ScanJobRepository: Send + Sync {
    /// Insert a job in `pending` status.
    async fn insert_scan(&self, new: NewScanJob) -> AppResult<ScanJob>;

    async fn get_scan(&self, id: Uuid) -> AppResult<Option<ScanJob>>;

    /// Jobs of one tool for a scope target, newest first.
    async fn list_scans_for_scope(
        &self,
        scope_target_id: Uuid,
        tool: ScanTool,
    ) -> AppResult<Vec<ScanJob>>;

    /// Apply the terminal update. Fails with `Conflict` if the job already left
    /// `pending`, `NotFound` if it does not exist.
    async fn complete_scan(&self, id: Uuid, outcome: ScanOutcome) -> AppResult<ScanJob>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> AppResult<()>;
}

/// Registered scope targets.
#[async_trait]
pub trait ScopeRegistry: Send + Sync {
    /// Find the scope entry of `scope_type` whose value equals `target`.
    async fn lookup(&self, target: &str, scope_type: ScopeType) -> AppResult<Option<Uuid>>;

    async fn get_scope_target(&self, id: Uuid) -> AppResult<Option<ScopeTarget>>;

    async fn list_scope_targets(&self) -> AppResult<Vec<ScopeTarget>>;

    /// Register a target. Fails with `Conflict` on a duplicate (type, value).
    async fn create_scope_target(
        &self,
        scope_type: ScopeType,
        scope_target: &str,
    ) -> AppResult<ScopeTarget>;

    /// Delete a target and everything owned by it. Returns false if absent.
    async fn delete_scope_target(&self, id: Uuid) -> AppResult<bool>;
}

/// Per-scope fuzzer configuration documents.
#[async_trait]
pub trait FuzzConfigRepository: Send + Sync {
    /// Raw stored document, if any.
    async fn get_fuzz_config(&self, scope_target_id: Uuid) -> AppResult<Option<JsonValue>>;

    async fn upsert_fuzz_config(&self, scope_target_id: Uuid, config: &FuzzConfig)
    -> AppResult<()>;
}

/// Uploaded fuzzer wordlists.
#[async_trait]
pub trait WordlistRegistry: Send + Sync {
    /// Path of a registered wordlist.
    async fn resolve_wordlist(&self, id: Uuid) -> AppResult<Option<String>>;

    async fn insert_wordlist(&self, wordlist: &Wordlist) -> AppResult<()>;

    /// All wordlists, newest first.
    async fn list_wordlists(&self) -> AppResult<Vec<Wordlist>>;

    async fn get_wordlist(&self, id: Uuid) -> AppResult<Option<Wordlist>>;

    async fn delete_wordlist(&self, id: Uuid) -> AppResult<bool>;
}

/// Bundle of storage handles injected into services and handlers.
#[derive(Clone)]
pub struct Repositories {
    pub scans: Arc<dyn ScanJobRepository>,
    pub scopes: Arc<dyn ScopeRegistry>,
    pub fuzz_configs: Arc<dyn FuzzConfigRepository>,
    pub wordlists: Arc<dyn WordlistRegistry>,
}

impl Repositories {
    /// Use one store for every concern.
    pub fn from_store<T>(store: Arc<T>) -> Self
    where
        T: ScanJobRepository + ScopeRegistry + FuzzConfigRepository + WordlistRegistry + 'static,
    {
        Self {
            scans: store.clone(),
            scopes: store.clone(),
            fuzz_configs: store.clone(),
            wordlists: store,
        }
    }
}
