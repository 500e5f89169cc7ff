// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job execution logger.
//!
//! Translates job lifecycle callbacks into ledger writes and execution
//! telemetry. Every entry point checks the logging kill-switch first and
//! captures the callback time before handing the work to a [`LogExecutor`],
//! so background delays never skew latency or period.

use bgjob_adapters::StatsSink;
use bgjob_core::{
    Clock, ExecutionReportedStats, ExecutionResultCode, FlagSource, JobId, SkipReason,
    UNAVAILABLE_STOP_REASON,
};
use bgjob_storage::ExecutionLedger;
use rand::Rng;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

type LogTask = Box<dyn FnOnce() + Send + 'static>;

/// Where ledger writes and telemetry emission run.
#[derive(Debug, Clone, Default)]
pub enum LogExecutor {
    /// On the calling thread. Used by short-lived processes and tests.
    #[default]
    Inline,
    /// Off the calling thread, in submission order.
    Background(BackgroundQueue),
}

impl LogExecutor {
    /// Start a background queue on `handle`.
    pub fn background(handle: &Handle) -> Self {
        Self::Background(BackgroundQueue::spawn(handle))
    }

    fn run<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match self {
            Self::Inline => task(),
            Self::Background(queue) => queue.push(Box::new(task)),
        }
    }
}

/// Single-consumer queue of logging work.
///
/// One task drains the queue and runs each item to completion on the
/// blocking pool before taking the next, so a job's start is always
/// applied before the finish or stop submitted after it.
#[derive(Debug, Clone)]
pub struct BackgroundQueue {
    tx: mpsc::UnboundedSender<LogTask>,
}

impl BackgroundQueue {
    fn spawn(handle: &Handle) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<LogTask>();
        handle.spawn(async move {
            while let Some(task) = rx.recv().await {
                if let Err(e) = tokio::task::spawn_blocking(task).await {
                    tracing::error!(error = %e, "background log task failed");
                }
            }
        });
        Self { tx }
    }

    fn push(&self, task: LogTask) {
        if self.tx.send(task).is_err() {
            tracing::warn!("log queue closed, dropping job log record");
        }
    }
}

struct LoggerInner<T, F, C> {
    ledger: Arc<ExecutionLedger>,
    stats: T,
    flags: F,
    clock: C,
}

impl<T: StatsSink, F: FlagSource, C: Clock> LoggerInner<T, F, C> {
    fn emit(&self, stats: ExecutionReportedStats, sampling_rate: u32) {
        if sampled(sampling_rate) {
            self.stats.log_execution(stats);
        } else {
            tracing::debug!(job_id = %stats.job_id, "execution stats sampled out");
        }
    }
}

fn sampled(rate: u32) -> bool {
    match rate {
        0 => false,
        r if r >= 100 => true,
        r => rand::rng().random_range(0..100) < r,
    }
}

/// Records job starts, finishes, stops and skips.
///
/// Cheap to clone; clones share the ledger and sink.
pub struct JobServiceLogger<T, F, C> {
    inner: Arc<LoggerInner<T, F, C>>,
    executor: LogExecutor,
}

impl<T, F, C> Clone for JobServiceLogger<T, F, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            executor: self.executor.clone(),
        }
    }
}

impl<T: StatsSink, F: FlagSource, C: Clock> JobServiceLogger<T, F, C> {
    pub fn new(
        ledger: Arc<ExecutionLedger>,
        stats: T,
        flags: F,
        clock: C,
        executor: LogExecutor,
    ) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                ledger,
                stats,
                flags,
                clock,
            }),
            executor,
        }
    }

    pub fn ledger(&self) -> &ExecutionLedger {
        &self.inner.ledger
    }

    /// Returns the sampling rate when logging is enabled.
    fn logging_enabled(&self, job_id: JobId) -> Option<u32> {
        let flags = self.inner.flags.flags();
        if flags.job_logging_disabled {
            tracing::debug!(job_id = %job_id, "job logging disabled");
            return None;
        }
        Some(flags.logging_sampling_rate)
    }

    pub fn record_on_start_job(&self, job_id: JobId) {
        let Some(rate) = self.logging_enabled(job_id) else {
            return;
        };
        let now_ms = self.inner.clock.epoch_ms();
        let inner = Arc::clone(&self.inner);
        self.executor.run(move || {
            if let Some(halted) = inner.ledger.record_start(job_id, now_ms) {
                inner.emit(halted, rate);
            }
        });
    }

    pub fn record_job_finished(&self, job_id: JobId, success: bool, should_retry: bool) {
        let code = ExecutionResultCode::finished(success, should_retry);
        self.record_stop(job_id, code, UNAVAILABLE_STOP_REASON);
    }

    /// The OS stop reason is reported only where the platform provides
    /// one; elsewhere the sentinel is recorded.
    pub fn record_on_stop_job(&self, job_id: JobId, should_retry: bool, stop_reason: Option<i32>) {
        let code = ExecutionResultCode::stopped(should_retry);
        let stop_reason = if self.inner.flags.flags().platform.supports_stop_reason() {
            stop_reason.unwrap_or(UNAVAILABLE_STOP_REASON)
        } else {
            UNAVAILABLE_STOP_REASON
        };
        self.record_stop(job_id, code, stop_reason);
    }

    /// A skipped execution closes the start recorded for it.
    pub fn record_job_skipped(&self, job_id: JobId, reason: SkipReason) {
        self.record_stop(job_id, reason.result_code(), UNAVAILABLE_STOP_REASON);
    }

    fn record_stop(&self, job_id: JobId, code: ExecutionResultCode, stop_reason: i32) {
        let Some(rate) = self.logging_enabled(job_id) else {
            return;
        };
        let now_ms = self.inner.clock.epoch_ms();
        let inner = Arc::clone(&self.inner);
        self.executor.run(move || {
            if let Some(stats) = inner.ledger.record_stop(job_id, now_ms, code, stop_reason) {
                inner.emit(stats, rate);
            }
        });
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
