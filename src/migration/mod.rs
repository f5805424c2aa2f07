//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20261017_000001_create_scope_targets;
mod m20261017_000002_create_scan_jobs;
mod m20261017_000003_create_fuzz_configs;
mod m20261017_000004_create_fuzz_wordlists;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261017_000001_create_scope_targets::Migration),
            Box::new(m20261017_000002_create_scan_jobs::Migration),
            Box::new(m20261017_000003_create_fuzz_configs::Migration),
            Box::new(m20261017_000004_create_fuzz_wordlists::Migration),
        ]
    }
}
