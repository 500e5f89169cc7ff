// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only JSONL telemetry sink.

use super::StatsSink;
use bgjob_core::{ErrorReport, ExecutionReportedStats, SchedulingReportedStats};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// One line of the telemetry log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatsLine {
    Execution(ExecutionReportedStats),
    Scheduling(SchedulingReportedStats),
    Error(ErrorReport),
}

#[derive(Serialize)]
struct StampedRef<'a> {
    ts_ms: u64,
    #[serde(flatten)]
    line: &'a StatsLine,
}

/// Telemetry sink writing one JSON object per line to a file.
///
/// Format: `{"ts_ms":1706602449000,"kind":"execution","job_id":2,...}`
///
/// Each event opens, writes, and closes the file. Failures are logged via
/// tracing and the event is dropped.
#[derive(Clone)]
pub struct JsonlStatsSink {
    path: Arc<PathBuf>,
}

impl JsonlStatsSink {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Arc::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: StatsLine) {
        if let Err(e) = self.write_line(&line) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to write telemetry"
            );
        }
    }

    fn write_line(&self, line: &StatsLine) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let elapsed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default();
        let ts_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let mut json = serde_json::to_vec(&StampedRef { ts_ms, line })?;
        json.push(b'\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path.as_path())?;
        file.write_all(&json)?;
        Ok(())
    }
}

impl StatsSink for JsonlStatsSink {
    fn log_execution(&self, stats: ExecutionReportedStats) {
        self.append(StatsLine::Execution(stats));
    }

    fn log_scheduling(&self, stats: SchedulingReportedStats) {
        self.append(StatsLine::Scheduling(stats));
    }

    fn log_error(&self, report: ErrorReport) {
        self.append(StatsLine::Error(report));
    }
}

#[cfg(test)]
#[path = "jsonl_tests.rs"]
mod tests;
