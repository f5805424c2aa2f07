//! Database queries for scan jobs.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter,
    QueryOrder, Set, Statement,
};
use uuid::Uuid;

use crate::entity::scan_job::{self, ActiveModel, Entity as ScanJobEntity};
use crate::error::{AppError, AppResult};
use crate::models::{NewScanJob, ScanJob, ScanOutcome, ScanPayload, ScanStatus, ScanTool};

use super::DbPool;
use super::repository::ScanJobRepository;

#[async_trait]
impl ScanJobRepository for DbPool {
    async fn insert_scan(&self, new: NewScanJob) -> AppResult<ScanJob> {
        let model = ActiveModel {
            id: Set(new.scan_id),
            tool: Set(new.tool.as_str().to_string()),
            target: Set(new.target),
            scope_target_id: Set(new.scope_target_id),
            status: Set(ScanStatus::Pending.as_str().to_string()),
            result: Set(None),
            error_detail: Set(None),
            command: Set(None),
            execution_time_ms: Set(None),
            created_at: Set(Utc::now()),
            completed_at: Set(None),
        };

        let inserted = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert scan job: {}", e)))?;

        model_to_scan(inserted)
    }

    async fn get_scan(&self, id: Uuid) -> AppResult<Option<ScanJob>> {
        let result = ScanJobEntity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get scan job: {}", e)))?;

        result.map(model_to_scan).transpose()
    }

    async fn list_scans_for_scope(
        &self,
        scope_target_id: Uuid,
        tool: ScanTool,
    ) -> AppResult<Vec<ScanJob>> {
        let models = ScanJobEntity::find()
            .filter(scan_job::Column::ScopeTargetId.eq(scope_target_id))
            .filter(scan_job::Column::Tool.eq(tool.as_str()))
            .order_by_desc(scan_job::Column::CreatedAt)
            .order_by_desc(scan_job::Column::Id) // UUIDv7 breaks timestamp ties
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list scan jobs: {}", e)))?;

        models.into_iter().map(model_to_scan).collect()
    }

    async fn complete_scan(&self, id: Uuid, outcome: ScanOutcome) -> AppResult<ScanJob> {
        let result_json = outcome
            .result
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::Database(format!("Failed to encode scan result: {}", e)))?;

        let changes = ActiveModel {
            status: Set(outcome.status().as_str().to_string()),
            result: Set(result_json),
            error_detail: Set(outcome.error_detail),
            command: Set(Some(outcome.command)),
            execution_time_ms: Set(Some(outcome.execution_time_ms)),
            completed_at: Set(Some(Utc::now())),
            ..Default::default()
        };

        // Guarded on status so a row can only ever leave 'pending' once
        let updated = ScanJobEntity::update_many()
            .set(changes)
            .filter(scan_job::Column::Id.eq(id))
            .filter(scan_job::Column::Status.eq(ScanStatus::Pending.as_str()))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to complete scan job: {}", e)))?;

        let current = self
            .get_scan(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Scan {}", id)))?;

        if updated.rows_affected == 0 {
            return Err(AppError::Conflict(format!(
                "Scan {} is already {}",
                id, current.status
            )));
        }

        Ok(current)
    }

    async fn ping(&self) -> AppResult<()> {
        let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
        self.connection().query_one_raw(stmt).await?;
        Ok(())
    }
}

/// Convert a row into the API model.
fn model_to_scan(m: scan_job::Model) -> AppResult<ScanJob> {
    let tool = ScanTool::parse(&m.tool)
        .ok_or_else(|| AppError::Database(format!("Unknown tool '{}' on scan {}", m.tool, m.id)))?;
    let status = ScanStatus::parse(&m.status).ok_or_else(|| {
        AppError::Database(format!("Unknown status '{}' on scan {}", m.status, m.id))
    })?;
    let result = m
        .result
        .map(serde_json::from_value::<ScanPayload>)
        .transpose()
        .map_err(|e| AppError::Database(format!("Malformed result on scan {}: {}", m.id, e)))?;

    Ok(ScanJob {
        scan_id: m.id,
        tool,
        target: m.target,
        scope_target_id: m.scope_target_id,
        status,
        result,
        error_detail: m.error_detail,
        command: m.command,
        execution_time_ms: m.execution_time_ms,
        created_at: m.created_at,
        completed_at: m.completed_at,
    })
}
