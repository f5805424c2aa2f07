//! Migration: Create fuzz_configs table.
//!
//! Stores the fuzzer configuration document for a scope target (one per scope).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE fuzz_configs (
                    scope_target_id UUID PRIMARY KEY REFERENCES scope_targets(id) ON DELETE CASCADE,
                    config JSONB NOT NULL DEFAULT '{}'::jsonb,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE TRIGGER update_fuzz_configs_updated_at
                    BEFORE UPDATE ON fuzz_configs
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS update_fuzz_configs_updated_at ON fuzz_configs;
                DROP TABLE IF EXISTS fuzz_configs CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
