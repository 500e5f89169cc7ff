// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake telemetry sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::StatsSink;
use bgjob_core::{ErrorReport, ExecutionReportedStats, SchedulingReportedStats};
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded telemetry event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsCall {
    Execution(ExecutionReportedStats),
    Scheduling(SchedulingReportedStats),
    Error(ErrorReport),
}

/// Fake sink recording every event in order
#[derive(Clone, Default)]
pub struct FakeStatsSink {
    calls: Arc<Mutex<Vec<StatsCall>>>,
}

impl FakeStatsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded events
    pub fn calls(&self) -> Vec<StatsCall> {
        self.calls.lock().clone()
    }

    pub fn executions(&self) -> Vec<ExecutionReportedStats> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                StatsCall::Execution(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn schedulings(&self) -> Vec<SchedulingReportedStats> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                StatsCall::Scheduling(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<ErrorReport> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                StatsCall::Error(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }
}

impl StatsSink for FakeStatsSink {
    fn log_execution(&self, stats: ExecutionReportedStats) {
        self.calls.lock().push(StatsCall::Execution(stats));
    }

    fn log_scheduling(&self, stats: SchedulingReportedStats) {
        self.calls.lock().push(StatsCall::Scheduling(stats));
    }

    fn log_error(&self, report: ErrorReport) {
        self.calls.lock().push(StatsCall::Error(report));
    }
}
