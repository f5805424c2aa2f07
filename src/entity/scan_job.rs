//! Scan job entity for SeaORM.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scan_jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tool: String,
    pub target: String,
    pub scope_target_id: Uuid,
    /// pending, success or error
    pub status: String,
    /// Normalized output, NULL until the job is terminal
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub result: Option<JsonValue>,
    pub error_detail: Option<String>,
    pub command: Option<String>,
    pub execution_time_ms: Option<i64>,
    pub created_at: DateTimeUtc,
    pub completed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scope_target::Entity",
        from = "Column::ScopeTargetId",
        to = "super::scope_target::Column::Id",
        on_delete = "Cascade"
    )]
    ScopeTarget,
}

impl Related<super::scope_target::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScopeTarget.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
