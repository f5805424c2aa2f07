//! Per-scope fuzzer configuration entity for SeaORM.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fuzz_configs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub scope_target_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub config: JsonValue,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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
