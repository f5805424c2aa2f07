//! Scope target entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "scope_targets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Company, Wildcard or URL
    pub scope_type: String,
    pub scope_target: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::scan_job::Entity")]
    ScanJobs,
    #[sea_orm(has_one = "super::fuzz_config::Entity")]
    FuzzConfig,
}

impl Related<super::scan_job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScanJobs.def()
    }
}

impl Related<super::fuzz_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FuzzConfig.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
