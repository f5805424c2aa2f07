//! Database operations for per-scope fuzzer configuration.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::entity::fuzz_config::{self, Entity as FuzzConfigEntity};
use crate::error::{AppError, AppResult};
use crate::models::FuzzConfig;

use super::DbPool;
use super::repository::FuzzConfigRepository;

#[async_trait]
impl FuzzConfigRepository for DbPool {
    async fn get_fuzz_config(&self, scope_target_id: Uuid) -> AppResult<Option<JsonValue>> {
        let found = FuzzConfigEntity::find_by_id(scope_target_id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get fuzz config: {}", e)))?;

        Ok(found.map(|m| m.config))
    }

    async fn upsert_fuzz_config(
        &self,
        scope_target_id: Uuid,
        config: &FuzzConfig,
    ) -> AppResult<()> {
        let now = Utc::now();
        let model = fuzz_config::ActiveModel {
            scope_target_id: Set(scope_target_id),
            config: Set(config.to_json()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        FuzzConfigEntity::insert(model)
            .on_conflict(
                OnConflict::column(fuzz_config::Column::ScopeTargetId)
                    .update_columns([fuzz_config::Column::Config, fuzz_config::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to save fuzz config: {}", e)))?;

        Ok(())
    }
}
