// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job service: the surface an OS job runtime calls into.
//!
//! Composes the dispatcher, the logger and the worker for one callback.

use crate::dispatcher::{Dispatch, JobDispatcher};
use crate::logger::{JobServiceLogger, LogExecutor};
use crate::worker_registry::WorkerRegistry;
use bgjob_adapters::{JobScheduler, StatsSink};
use bgjob_core::{Clock, FlagSource, JobId, JobRegistry, SchedulingResultCode, SkipReason};
use bgjob_storage::ExecutionLedger;
use std::sync::Arc;

/// External collaborators of a [`JobService`].
pub struct JobServiceDeps<J, T, F, C> {
    pub legacy_scheduler: J,
    pub policy_scheduler: J,
    pub stats: T,
    pub flags: F,
    pub clock: C,
    pub ledger: Arc<ExecutionLedger>,
}

pub struct JobService<J, T, F, C> {
    dispatcher: JobDispatcher<J, T, F>,
    logger: JobServiceLogger<T, F, C>,
}

impl<J, T, F, C> JobService<J, T, F, C>
where
    J: JobScheduler,
    T: StatsSink,
    F: FlagSource,
    C: Clock,
{
    pub fn new(
        deps: JobServiceDeps<J, T, F, C>,
        registry: Arc<JobRegistry>,
        workers: Arc<WorkerRegistry>,
        executor: LogExecutor,
    ) -> Self {
        let logger = JobServiceLogger::new(
            deps.ledger,
            deps.stats.clone(),
            deps.flags.clone(),
            deps.clock,
            executor,
        );
        let dispatcher = JobDispatcher::new(
            registry,
            workers,
            deps.legacy_scheduler,
            deps.policy_scheduler,
            deps.stats,
            deps.flags,
        );
        Self { dispatcher, logger }
    }

    pub fn dispatcher(&self) -> &JobDispatcher<J, T, F> {
        &self.dispatcher
    }

    pub fn logger(&self) -> &JobServiceLogger<T, F, C> {
        &self.logger
    }

    /// Route a job start and, on the policy path, record the start.
    ///
    /// An [`Dispatch::Execute`] result carries the worker the caller must
    /// run and later report through [`job_finished`](Self::job_finished)
    /// or [`on_stop_job`](Self::on_stop_job).
    pub fn start_job(&self, job_id: JobId) -> Dispatch {
        let dispatch = self.dispatcher.on_start_job(job_id);
        if dispatch.is_execute() {
            self.logger.record_on_start_job(job_id);
        } else {
            tracing::debug!(job_id = %job_id, ?dispatch, "job not executed here");
        }
        dispatch
    }

    /// Full start callback: dispatch, run the worker, record the outcome.
    ///
    /// Returns whether the job ran on this path.
    pub async fn on_start_job(&self, job_id: JobId) -> bool {
        let Dispatch::Execute(worker) = self.start_job(job_id) else {
            return false;
        };
        let outcome = worker.execute().await;
        tracing::info!(
            job_id = %job_id,
            success = outcome.success,
            retry = outcome.should_retry,
            "job finished",
        );
        self.job_finished(job_id, outcome.success, outcome.should_retry);
        true
    }

    pub fn job_finished(&self, job_id: JobId, success: bool, should_retry: bool) {
        self.logger.record_job_finished(job_id, success, should_retry);
    }

    /// OS stop callback. Returns whether the job wants to be rescheduled.
    pub fn on_stop_job(&self, job_id: JobId, stop_reason: Option<i32>) -> bool {
        let retry = self.dispatcher.workers().retry_on_stop(job_id);
        self.logger.record_on_stop_job(job_id, retry, stop_reason);
        retry
    }

    /// Record a start immediately closed with a skip result.
    pub fn skip_job(&self, job_id: JobId, reason: SkipReason) {
        self.logger.record_on_start_job(job_id);
        self.logger.record_job_skipped(job_id, reason);
    }

    pub fn schedule(&self, job_id: JobId) -> SchedulingResultCode {
        self.dispatcher.schedule(job_id)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
