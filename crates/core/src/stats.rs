// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Telemetry event shapes.
//!
//! Fields use the wire representation: absent values carry
//! [`UNAVAILABLE`](crate::UNAVAILABLE) rather than being omitted.

use crate::{ExecutionResultCode, JobId, SchedulerType, SchedulingResultCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One finished, stopped, skipped or halted execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReportedStats {
    pub job_id: JobId,
    pub latency_ms: i64,
    pub period_ms: i64,
    pub result_code: ExecutionResultCode,
    pub stop_reason: i32,
}

/// One attempt to register a job with a scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingReportedStats {
    pub job_id: JobId,
    pub result_code: SchedulingResultCode,
    pub scheduler_type: SchedulerType,
}

/// Configuration errors surfaced to telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No worker is registered for a job the policy path tried to run.
    WorkerNotFound,
    /// The job id is missing from the job registry.
    JobNotRegistered,
    /// A scheduler refused to register the job.
    SchedulingFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkerNotFound => f.write_str("worker_not_found"),
            Self::JobNotRegistered => f.write_str("job_not_registered"),
            Self::SchedulingFailed => f.write_str("scheduling_failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub job_id: JobId,
}
