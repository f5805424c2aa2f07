//! Database operations for scope targets.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};
use uuid::Uuid;

use crate::entity::scope_target::{self, Entity as ScopeTargetEntity};
use crate::error::{AppError, AppResult};
use crate::models::{ScopeTarget, ScopeType};

use super::DbPool;
use super::repository::ScopeRegistry;

#[async_trait]
impl ScopeRegistry for DbPool {
    async fn lookup(&self, target: &str, scope_type: ScopeType) -> AppResult<Option<Uuid>> {
        let found = ScopeTargetEntity::find()
            .filter(scope_target::Column::ScopeType.eq(scope_type.as_str()))
            .filter(scope_target::Column::ScopeTarget.eq(target))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to look up scope target: {}", e)))?;

        Ok(found.map(|m| m.id))
    }

    async fn get_scope_target(&self, id: Uuid) -> AppResult<Option<ScopeTarget>> {
        let found = ScopeTargetEntity::find_by_id(id)
            .one(self.connection())
            .await?;

        found.map(model_to_scope_target).transpose()
    }

    async fn list_scope_targets(&self) -> AppResult<Vec<ScopeTarget>> {
        let models = ScopeTargetEntity::find()
            .order_by_desc(scope_target::Column::CreatedAt)
            .all(self.connection())
            .await?;

        models.into_iter().map(model_to_scope_target).collect()
    }

    async fn create_scope_target(
        &self,
        scope_type: ScopeType,
        scope_target: &str,
    ) -> AppResult<ScopeTarget> {
        let model = scope_target::ActiveModel {
            id: Set(Uuid::new_v4()),
            scope_type: Set(scope_type.as_str().to_string()),
            scope_target: Set(scope_target.to_string()),
            created_at: Set(Utc::now()),
        };

        let inserted = ScopeTargetEntity::insert(model)
            .exec_with_returning(self.connection())
            .await
            .map_err(|e| insert_error(e, scope_type, scope_target))?;

        model_to_scope_target(inserted)
    }

    async fn delete_scope_target(&self, id: Uuid) -> AppResult<bool> {
        // scan_jobs and fuzz_configs cascade
        let result = ScopeTargetEntity::delete_by_id(id)
            .exec(self.connection())
            .await?;

        Ok(result.rows_affected > 0)
    }
}

fn insert_error(err: DbErr, scope_type: ScopeType, scope_target: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(format!(
            "{} scope target '{}' already exists",
            scope_type, scope_target
        )),
        _ => AppError::Database(format!("Failed to insert scope target: {}", err)),
    }
}

fn model_to_scope_target(m: scope_target::Model) -> AppResult<ScopeTarget> {
    let scope_type = ScopeType::parse(&m.scope_type).ok_or_else(|| {
        AppError::Database(format!(
            "Unknown scope type '{}' on scope target {}",
            m.scope_type, m.id
        ))
    })?;

    Ok(ScopeTarget {
        id: m.id,
        scope_type,
        scope_target: m.scope_target,
        created_at: m.created_at,
    })
}
