//! Migration: Create fuzz_wordlists table.
//!
//! Uploaded wordlists; the file lives on disk, the row holds its path.

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
                CREATE TABLE fuzz_wordlists (
                    id UUID PRIMARY KEY,
                    name VARCHAR(255) NOT NULL,
                    path TEXT NOT NULL,
                    line_count BIGINT NOT NULL DEFAULT 0,
                    file_size BIGINT NOT NULL DEFAULT 0,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_fuzz_wordlists_created_at ON fuzz_wordlists(created_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS fuzz_wordlists CASCADE;")
            .await?;

        Ok(())
    }
}
