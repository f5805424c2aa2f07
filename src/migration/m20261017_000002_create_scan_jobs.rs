//! Migration: Create scan_jobs table.
//!
//! One row per tool execution. Rows are inserted as 'pending' and receive
//! exactly one terminal update (status, result, error, command, timing).

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
                CREATE TABLE scan_jobs (
                    id UUID PRIMARY KEY, -- UUIDv7 for time-ordered sorting
                    tool VARCHAR(20) NOT NULL
                        CHECK (tool IN ('katana', 'linkfinder', 'waybackurls', 'gau', 'ffuf')),
                    target TEXT NOT NULL,
                    scope_target_id UUID NOT NULL REFERENCES scope_targets(id) ON DELETE CASCADE,

                    status VARCHAR(20) NOT NULL DEFAULT 'pending'
                        CHECK (status IN ('pending', 'success', 'error')),

                    -- Terminal fields, written together by a single update
                    result JSONB,
                    error_detail TEXT,
                    command TEXT,
                    execution_time_ms BIGINT,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    completed_at TIMESTAMPTZ,

                    CHECK (status = 'pending' OR completed_at IS NOT NULL)
                );

                -- Listing scans for a scope and tool, newest first
                CREATE INDEX idx_scan_jobs_scope_tool_created
                    ON scan_jobs(scope_target_id, tool, created_at DESC);

                -- Finding in-flight scans
                CREATE INDEX idx_scan_jobs_pending ON scan_jobs(status)
                    WHERE status = 'pending';
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS scan_jobs CASCADE;")
            .await?;

        Ok(())
    }
}
