// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Telemetry sinks.
//!
//! Delivery is best-effort and at-most-once: sinks swallow their own
//! failures after logging them, and callers never wait on a result.

mod jsonl;

pub use jsonl::{JsonlStatsSink, StatsLine};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeStatsSink, StatsCall};

use bgjob_core::{ErrorReport, ExecutionReportedStats, SchedulingReportedStats};

/// Destination for execution, scheduling and configuration-error telemetry.
pub trait StatsSink: Clone + Send + Sync + 'static {
    fn log_execution(&self, stats: ExecutionReportedStats);

    fn log_scheduling(&self, stats: SchedulingReportedStats);

    fn log_error(&self, report: ErrorReport);
}
