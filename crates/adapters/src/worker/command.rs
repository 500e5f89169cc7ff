// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker that runs a shell command.

use super::{ExecutionOutcome, Worker};
use crate::env;
use crate::subprocess::run_with_timeout;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Runs `bash -c <command>`; exit status 0 is success.
#[derive(Debug, Clone)]
pub struct CommandWorker {
    command: String,
    cwd: Option<PathBuf>,
    timeout: Duration,
    retry_on_failure: bool,
}

impl CommandWorker {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cwd: None,
            timeout: env::worker_timeout(),
            retry_on_failure: true,
        }
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a non-zero exit asks to be retried. Timeouts always retry.
    pub fn retry_on_failure(mut self, retry: bool) -> Self {
        self.retry_on_failure = retry;
        self
    }
}

#[async_trait]
impl Worker for CommandWorker {
    async fn execute(&self) -> ExecutionOutcome {
        let mut cmd = Command::new("bash");
        cmd.arg("-c").arg(&self.command).kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        match run_with_timeout(cmd, self.timeout, "worker command").await {
            Ok(output) if output.status.success() => {
                tracing::debug!(command = %self.command, "worker command succeeded");
                ExecutionOutcome::success()
            }
            Ok(output) => {
                tracing::warn!(
                    command = %self.command,
                    status = %output.status,
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "worker command failed"
                );
                ExecutionOutcome::failure(self.retry_on_failure)
            }
            Err(e) => {
                tracing::warn!(command = %self.command, error = %e, "worker command error");
                ExecutionOutcome::failure(true)
            }
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
