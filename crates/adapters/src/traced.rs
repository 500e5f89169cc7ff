// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::scheduler::{JobScheduler, SchedulerError};
use crate::stats::StatsSink;
use bgjob_core::{
    ErrorReport, ExecutionReportedStats, JobDescriptor, JobId, SchedulerType,
    SchedulingReportedStats,
};

/// Wrapper that adds tracing to any StatsSink
#[derive(Clone)]
pub struct TracedStatsSink<S> {
    inner: S,
}

impl<S> TracedStatsSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: StatsSink> StatsSink for TracedStatsSink<S> {
    fn log_execution(&self, stats: ExecutionReportedStats) {
        tracing::info!(
            job_id = %stats.job_id,
            latency_ms = stats.latency_ms,
            period_ms = stats.period_ms,
            result = %stats.result_code,
            stop_reason = stats.stop_reason,
            "execution reported"
        );
        self.inner.log_execution(stats);
    }

    fn log_scheduling(&self, stats: SchedulingReportedStats) {
        tracing::info!(
            job_id = %stats.job_id,
            result = ?stats.result_code,
            scheduler = %stats.scheduler_type,
            "scheduling reported"
        );
        self.inner.log_scheduling(stats);
    }

    fn log_error(&self, report: ErrorReport) {
        tracing::error!(job_id = %report.job_id, code = %report.code, "error reported");
        self.inner.log_error(report);
    }
}

/// Wrapper that adds tracing to any JobScheduler
#[derive(Clone)]
pub struct TracedScheduler<J> {
    inner: J,
    kind: SchedulerType,
}

impl<J> TracedScheduler<J> {
    pub fn new(inner: J, kind: SchedulerType) -> Self {
        Self { inner, kind }
    }
}

impl<J: JobScheduler> JobScheduler for TracedScheduler<J> {
    fn schedule(&self, job: &JobDescriptor) -> Result<(), SchedulerError> {
        let _span = tracing::info_span!("scheduler.schedule", scheduler = %self.kind, job = %job.name)
            .entered();
        let start = std::time::Instant::now();
        let result = self.inner.schedule(job);
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => tracing::info!(job_id = %job.id, elapsed_ms, "job scheduled"),
            Err(e) => tracing::error!(job_id = %job.id, elapsed_ms, error = %e, "schedule failed"),
        }
        result
    }

    fn cancel(&self, job_id: JobId) -> Result<(), SchedulerError> {
        let result = self.inner.cancel(job_id);
        tracing::info_span!("scheduler.cancel", scheduler = %self.kind, job_id = %job_id)
            .in_scope(|| match &result {
                Ok(()) => tracing::info!("job cancelled"),
                Err(e) => tracing::error!(error = %e, "cancel failed"),
            });
        result
    }

    fn is_scheduled(&self, job_id: JobId) -> bool {
        self.inner.is_scheduled(job_id)
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
