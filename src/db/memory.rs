//! In-process store implementing every repository trait.
//!
//! Mirrors the constraints the PostgreSQL schema enforces (unique scope
//! targets, foreign keys with cascade, the pending-only terminal update) so
//! services behave the same against either backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    FuzzConfig, NewScanJob, ScanJob, ScanOutcome, ScanStatus, ScanTool, ScopeTarget, ScopeType,
    Wordlist,
};

use super::repository::{FuzzConfigRepository, ScanJobRepository, ScopeRegistry, WordlistRegistry};

#[derive(Default)]
struct Tables {
    scopes: HashMap<Uuid, ScopeTarget>,
    scans: HashMap<Uuid, ScanJob>,
    fuzz_configs: HashMap<Uuid, JsonValue>,
    wordlists: HashMap<Uuid, Wordlist>,
}

/// Memory-backed store, mainly for tests and local experiments.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of scan jobs across all scopes and tools.
    pub fn scan_count(&self) -> usize {
        self.tables().map(|t| t.scans.len()).unwrap_or(0)
    }

    /// Store a raw fuzz config document without decoding it.
    pub fn put_raw_fuzz_config(&self, scope_target_id: Uuid, config: JsonValue) -> AppResult<()> {
        self.tables()?.fuzz_configs.insert(scope_target_id, config);
        Ok(())
    }

    fn tables(&self) -> AppResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| AppError::Database("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ScanJobRepository for MemoryStore {
    async fn insert_scan(&self, new: NewScanJob) -> AppResult<ScanJob> {
        let mut tables = self.tables()?;
        if !tables.scopes.contains_key(&new.scope_target_id) {
            return Err(AppError::Database(format!(
                "scope target {} does not exist",
                new.scope_target_id
            )));
        }
        if tables.scans.contains_key(&new.scan_id) {
            return Err(AppError::Database(format!(
                "scan {} already exists",
                new.scan_id
            )));
        }

        let job = ScanJob {
            scan_id: new.scan_id,
            tool: new.tool,
            target: new.target,
            scope_target_id: new.scope_target_id,
            status: ScanStatus::Pending,
            result: None,
            error_detail: None,
            command: None,
            execution_time_ms: None,
            created_at: Utc::now(),
            completed_at: None,
        };
        tables.scans.insert(job.scan_id, job.clone());
        Ok(job)
    }

    async fn get_scan(&self, id: Uuid) -> AppResult<Option<ScanJob>> {
        Ok(self.tables()?.scans.get(&id).cloned())
    }

    async fn list_scans_for_scope(
        &self,
        scope_target_id: Uuid,
        tool: ScanTool,
    ) -> AppResult<Vec<ScanJob>> {
        let tables = self.tables()?;
        let mut jobs: Vec<ScanJob> = tables
            .scans
            .values()
            .filter(|j| j.scope_target_id == scope_target_id && j.tool == tool)
            .cloned()
            .collect();
        jobs.sort_by(|a, b| (b.created_at, b.scan_id).cmp(&(a.created_at, a.scan_id)));
        Ok(jobs)
    }

    async fn complete_scan(&self, id: Uuid, outcome: ScanOutcome) -> AppResult<ScanJob> {
        let mut tables = self.tables()?;
        let job = tables
            .scans
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Scan {}", id)))?;

        if job.status != ScanStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Scan {} is already {}",
                id, job.status
            )));
        }

        job.status = outcome.status();
        job.result = outcome.result;
        job.error_detail = outcome.error_detail;
        job.command = Some(outcome.command);
        job.execution_time_ms = Some(outcome.execution_time_ms);
        job.completed_at = Some(Utc::now());
        Ok(job.clone())
    }

    async fn ping(&self) -> AppResult<()> {
        self.tables().map(|_| ())
    }
}

#[async_trait]
impl ScopeRegistry for MemoryStore {
    async fn lookup(&self, target: &str, scope_type: ScopeType) -> AppResult<Option<Uuid>> {
        Ok(self
            .tables()?
            .scopes
            .values()
            .find(|s| s.scope_type == scope_type && s.scope_target == target)
            .map(|s| s.id))
    }

    async fn get_scope_target(&self, id: Uuid) -> AppResult<Option<ScopeTarget>> {
        Ok(self.tables()?.scopes.get(&id).cloned())
    }

    async fn list_scope_targets(&self) -> AppResult<Vec<ScopeTarget>> {
        let mut scopes: Vec<ScopeTarget> = self.tables()?.scopes.values().cloned().collect();
        scopes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(scopes)
    }

    async fn create_scope_target(
        &self,
        scope_type: ScopeType,
        scope_target: &str,
    ) -> AppResult<ScopeTarget> {
        let mut tables = self.tables()?;
        let duplicate = tables
            .scopes
            .values()
            .any(|s| s.scope_type == scope_type && s.scope_target == scope_target);
        if duplicate {
            return Err(AppError::Conflict(format!(
                "{} scope target '{}' already exists",
                scope_type, scope_target
            )));
        }

        let scope = ScopeTarget {
            id: Uuid::new_v4(),
            scope_type,
            scope_target: scope_target.to_string(),
            created_at: Utc::now(),
        };
        tables.scopes.insert(scope.id, scope.clone());
        Ok(scope)
    }

    async fn delete_scope_target(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables()?;
        if tables.scopes.remove(&id).is_none() {
            return Ok(false);
        }
        tables.scans.retain(|_, j| j.scope_target_id != id);
        tables.fuzz_configs.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl FuzzConfigRepository for MemoryStore {
    async fn get_fuzz_config(&self, scope_target_id: Uuid) -> AppResult<Option<JsonValue>> {
        Ok(self.tables()?.fuzz_configs.get(&scope_target_id).cloned())
    }

    async fn upsert_fuzz_config(
        &self,
        scope_target_id: Uuid,
        config: &FuzzConfig,
    ) -> AppResult<()> {
        let mut tables = self.tables()?;
        if !tables.scopes.contains_key(&scope_target_id) {
            return Err(AppError::Database(format!(
                "scope target {} does not exist",
                scope_target_id
            )));
        }
        tables.fuzz_configs.insert(scope_target_id, config.to_json());
        Ok(())
    }
}

#[async_trait]
impl WordlistRegistry for MemoryStore {
    async fn resolve_wordlist(&self, id: Uuid) -> AppResult<Option<String>> {
        Ok(self.tables()?.wordlists.get(&id).map(|w| w.path.clone()))
    }

    async fn insert_wordlist(&self, wordlist: &Wordlist) -> AppResult<()> {
        self.tables()?
            .wordlists
            .insert(wordlist.id, wordlist.clone());
        Ok(())
    }

    async fn list_wordlists(&self) -> AppResult<Vec<Wordlist>> {
        let mut lists: Vec<Wordlist> = self.tables()?.wordlists.values().cloned().collect();
        lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(lists)
    }

    async fn get_wordlist(&self, id: Uuid) -> AppResult<Option<Wordlist>> {
        Ok(self.tables()?.wordlists.get(&id).cloned())
    }

    async fn delete_wordlist(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.tables()?.wordlists.remove(&id).is_some())
    }
}
