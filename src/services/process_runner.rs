//! Out-of-process tool execution.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// A program plus its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Space-joined invocation, as recorded on the job.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Everything captured from one run.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
    /// Set when the process could not be launched or exited non-zero.
    pub exec_error: Option<String>,
}

impl ProcessOutput {
    pub fn succeeded(&self) -> bool {
        self.exec_error.is_none()
    }

    /// Failure text for the job: stderr, or the launch/exit error when
    /// stderr is empty.
    pub fn failure_detail(&self) -> String {
        if self.stderr.trim().is_empty() {
            self.exec_error.clone().unwrap_or_default()
        } else {
            self.stderr.clone()
        }
    }
}

/// Where tool invocations run.
#[async_trait]
pub trait ToolHost: Send + Sync {
    /// Run to completion, capturing all output. Never fails; errors are
    /// reported through `ProcessOutput::exec_error`.
    async fn run(&self, invocation: &ToolInvocation) -> ProcessOutput;
}

/// Runs invocations as local child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolHost for ProcessRunner {
    async fn run(&self, invocation: &ToolInvocation) -> ProcessOutput {
        debug!(command = %invocation.command_line(), "spawning tool process");

        let started = Instant::now();
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .kill_on_drop(true)
            .output()
            .await;
        let elapsed = started.elapsed();

        match output {
            Ok(output) => ProcessOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                elapsed,
                exec_error: (!output.status.success()).then(|| output.status.to_string()),
            },
            Err(e) => ProcessOutput {
                elapsed,
                exec_error: Some(format!("failed to start {}: {}", invocation.program, e)),
                ..Default::default()
            },
        }
    }
}
