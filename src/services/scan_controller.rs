//! Scan job lifecycle: validate, record, run in the background, finish once.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::ToolConfig;
use crate::db::Repositories;
use crate::error::{AppError, AppResult};
use crate::models::{
    NewScanJob, OutputFormat, ScanJob, ScanOutcome, ScanPayload, ScanTool, StartScanRequest,
};

use super::event_broadcaster::EventBroadcaster;
use super::fuzz_config::resolve_fuzz_params;
use super::normalizer::{NormalizeError, normalize_lines, parse_fuzz_report};
use super::process_runner::ToolHost;
use super::scope_validator::validate_target;
use super::tool_commands::ToolCommands;

/// A scan that was accepted and is now running in the background.
#[derive(Debug)]
pub struct StartedScan {
    pub scan_id: Uuid,
    /// Background execution. HTTP handlers drop it; tests may await it.
    pub task: JoinHandle<()>,
}

/// Owns scan job creation and the single terminal update of every job.
#[derive(Clone)]
pub struct ScanController {
    repos: Repositories,
    host: Arc<dyn ToolHost>,
    commands: ToolCommands,
    default_wordlist: String,
    permits: Arc<Semaphore>,
    events: EventBroadcaster,
}

impl ScanController {
    pub fn new(
        repos: Repositories,
        host: Arc<dyn ToolHost>,
        tools: ToolConfig,
        max_concurrent_scans: usize,
        events: EventBroadcaster,
    ) -> Self {
        Self {
            repos,
            host,
            default_wordlist: tools.default_wordlist.clone(),
            commands: ToolCommands::new(tools),
            permits: Arc::new(Semaphore::new(max_concurrent_scans.max(1))),
            events,
        }
    }

    pub fn events(&self) -> &EventBroadcaster {
        &self.events
    }

    /// Validate and record a scan, then start it without waiting for it.
    ///
    /// Validation failures return before any job row exists.
    pub async fn create_scan(
        &self,
        tool: ScanTool,
        request: StartScanRequest,
    ) -> AppResult<StartedScan> {
        let url = request.url.trim().to_string();
        if url.is_empty() {
            return Err(AppError::InvalidInput("url is required".to_string()));
        }
        if tool.requires_scope_claim() && request.scope_target_id.is_none() {
            return Err(AppError::InvalidInput(format!(
                "scope_target_id is required for {} scans",
                tool
            )));
        }

        let scope_target_id =
            validate_target(self.repos.scopes.as_ref(), &url, request.scope_target_id).await?;

        let job = self
            .repos
            .scans
            .insert_scan(NewScanJob {
                scan_id: Uuid::now_v7(),
                tool,
                target: url,
                scope_target_id,
            })
            .await?;

        info!(
            scan_id = %job.scan_id,
            tool = %tool,
            url = %job.target,
            "scan created"
        );
        self.events.scan_created(&job);

        let scan_id = job.scan_id;
        let controller = self.clone();
        let task = tokio::spawn(async move { controller.execute(job).await });

        Ok(StartedScan { scan_id, task })
    }

    /// Run a pending job to its terminal state.
    async fn execute(&self, job: ScanJob) {
        // Queued jobs simply stay pending until a permit frees up
        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                error!(scan_id = %job.scan_id, "execution pool closed: {}", e);
                return;
            }
        };

        let outcome = self.run_tool(&job).await;
        match &outcome {
            o if o.error_detail.is_some() => warn!(
                scan_id = %job.scan_id,
                tool = %job.tool,
                elapsed_ms = o.execution_time_ms,
                "scan failed"
            ),
            o => info!(
                scan_id = %job.scan_id,
                tool = %job.tool,
                elapsed_ms = o.execution_time_ms,
                "scan finished"
            ),
        }

        match self.repos.scans.complete_scan(job.scan_id, outcome).await {
            Ok(done) => {
                self.events.scan_updated(&done);
            }
            Err(e) => error!(
                scan_id = %job.scan_id,
                "failed to record scan outcome: {}",
                e
            ),
        }
    }

    async fn run_tool(&self, job: &ScanJob) -> ScanOutcome {
        match job.tool.output_format() {
            OutputFormat::LineList => {
                let Some(invocation) = self.commands.line_tool(job.tool, &job.target) else {
                    return ScanOutcome::failure(
                        format!("{} has no line-list template", job.tool),
                        String::new(),
                        Default::default(),
                    );
                };
                let output = self.host.run(&invocation).await;
                let command = invocation.command_line();
                if !output.succeeded() {
                    return ScanOutcome::failure(output.failure_detail(), command, output.elapsed);
                }
                ScanOutcome::success(normalize_lines(output.stdout), command, output.elapsed)
            }
            OutputFormat::FuzzReport => {
                let params = resolve_fuzz_params(
                    self.repos.fuzz_configs.as_ref(),
                    self.repos.wordlists.as_ref(),
                    job.scope_target_id,
                    &self.default_wordlist,
                )
                .await;
                let invocation = self.commands.fuzz(job.scan_id, &job.target, &params);
                let output = self.host.run(&invocation).await;
                let command = invocation.command_line();
                let elapsed = output.elapsed;
                if !output.succeeded() {
                    return ScanOutcome::failure(output.failure_detail(), command, elapsed);
                }

                let report = self
                    .host
                    .run(&self.commands.read_fuzz_report(job.scan_id))
                    .await;
                if !report.succeeded() {
                    return ScanOutcome::failure(
                        NormalizeError::ReportUnreadable.to_string(),
                        command,
                        elapsed,
                    );
                }

                match parse_fuzz_report(&report.stdout) {
                    Ok(results) => {
                        info!(
                            scan_id = %job.scan_id,
                            endpoints = results.endpoints.len(),
                            "fuzz report parsed"
                        );
                        ScanOutcome::success(ScanPayload::Endpoints(results), command, elapsed)
                    }
                    Err(e) => ScanOutcome::failure(e.to_string(), command, elapsed),
                }
            }
        }
    }

    /// Fetch a job of `tool`. Ids of other tools are reported as missing.
    pub async fn get_scan(&self, tool: ScanTool, scan_id: Uuid) -> AppResult<ScanJob> {
        self.repos
            .scans
            .get_scan(scan_id)
            .await?
            .filter(|job| job.tool == tool)
            .ok_or_else(|| AppError::NotFound(format!("{} scan {}", tool, scan_id)))
    }

    /// All jobs of `tool` for a scope target, newest first.
    pub async fn list_scans(
        &self,
        tool: ScanTool,
        scope_target_id: Uuid,
    ) -> AppResult<Vec<ScanJob>> {
        self.repos
            .scans
            .list_scans_for_scope(scope_target_id, tool)
            .await
    }
}
