// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduling policy dispatcher.
//!
//! Routes each job start between the legacy scheduling path and the
//! policy path:
//!
//! ```text
//! on_start_job(id)
//!   back-compat build on T+? ───────────────→ NotExecuted
//!   batch flag off?        ── legacy resched → Delegated
//!   no worker for id?      ── error report ──→ Failed
//!   otherwise ──────────────────────────────→ Execute(worker)
//! ```

use crate::batch::SchedulingDecision;
use crate::worker_registry::WorkerRegistry;
use bgjob_adapters::{JobScheduler, StatsSink, Worker};
use bgjob_core::{
    ErrorCode, ErrorReport, FlagSource, JobId, JobRegistry, SchedulerType,
    SchedulingReportedStats, SchedulingResultCode,
};
use std::fmt;
use std::sync::Arc;

/// Outcome of routing one job start.
pub enum Dispatch {
    /// The job must not run on this build. The ledger is not touched.
    NotExecuted,
    /// Handed to the legacy scheduler; nothing runs here.
    Delegated,
    /// No worker could be resolved.
    Failed,
    /// Run this worker on the policy path.
    Execute(Box<dyn Worker>),
}

impl Dispatch {
    pub fn is_execute(&self) -> bool {
        matches!(self, Self::Execute(_))
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotExecuted => f.write_str("NotExecuted"),
            Self::Delegated => f.write_str("Delegated"),
            Self::Failed => f.write_str("Failed"),
            Self::Execute(_) => f.write_str("Execute(..)"),
        }
    }
}

pub struct JobDispatcher<J, T, F> {
    registry: Arc<JobRegistry>,
    workers: Arc<WorkerRegistry>,
    legacy: J,
    policy: J,
    stats: T,
    flags: F,
}

impl<J: JobScheduler, T: StatsSink, F: FlagSource> JobDispatcher<J, T, F> {
    pub fn new(
        registry: Arc<JobRegistry>,
        workers: Arc<WorkerRegistry>,
        legacy: J,
        policy: J,
        stats: T,
        flags: F,
    ) -> Self {
        Self {
            registry,
            workers,
            legacy,
            policy,
            stats,
            flags,
        }
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn workers(&self) -> &WorkerRegistry {
        &self.workers
    }

    pub fn on_start_job(&self, job_id: JobId) -> Dispatch {
        let flags = self.flags.flags();

        if flags.platform.back_compat_disabled() {
            tracing::info!(
                job_id = %job_id,
                sdk_level = flags.platform.sdk_level,
                "back-compat job disabled on this platform, not running",
            );
            return Dispatch::NotExecuted;
        }

        if SchedulingDecision::for_job(job_id, &flags).use_legacy_path {
            tracing::info!(job_id = %job_id, "migration flag off, delegating to legacy scheduler");
            self.schedule_on(job_id, SchedulerType::Legacy, !flags.job_logging_disabled);
            return Dispatch::Delegated;
        }

        match self.workers.resolve(job_id) {
            Some(worker) => Dispatch::Execute(worker),
            None => {
                tracing::error!(job_id = %job_id, "no worker registered");
                self.stats.log_error(ErrorReport {
                    code: ErrorCode::WorkerNotFound,
                    job_id,
                });
                Dispatch::Failed
            }
        }
    }

    /// Register `job_id` on the path its batch flag selects.
    pub fn schedule(&self, job_id: JobId) -> SchedulingResultCode {
        let flags = self.flags.flags();

        if flags.platform.back_compat_disabled() {
            tracing::info!(job_id = %job_id, "back-compat job disabled, not scheduling");
            return SchedulingResultCode::Skipped;
        }

        let kind = if SchedulingDecision::for_job(job_id, &flags).use_legacy_path {
            SchedulerType::Legacy
        } else {
            SchedulerType::Policy
        };
        self.schedule_on(job_id, kind, !flags.job_logging_disabled)
    }

    /// Cancel the registration on the other path, then register on `kind`.
    fn schedule_on(&self, job_id: JobId, kind: SchedulerType, report: bool) -> SchedulingResultCode {
        let Some(job) = self.registry.resolve(job_id) else {
            tracing::error!(job_id = %job_id, "job not in registry");
            self.stats.log_error(ErrorReport {
                code: ErrorCode::JobNotRegistered,
                job_id,
            });
            return SchedulingResultCode::Failed;
        };

        let (target, other) = match kind {
            SchedulerType::Legacy => (&self.legacy, &self.policy),
            SchedulerType::Policy => (&self.policy, &self.legacy),
        };

        if let Err(e) = other.cancel(job_id) {
            tracing::warn!(job_id = %job_id, error = %e, "failed to cancel other registration");
        }

        let result_code = match target.schedule(job) {
            Ok(()) => SchedulingResultCode::Successful,
            Err(e) => {
                tracing::error!(job_id = %job_id, scheduler = %kind, error = %e, "scheduling failed");
                self.stats.log_error(ErrorReport {
                    code: ErrorCode::SchedulingFailed,
                    job_id,
                });
                SchedulingResultCode::Failed
            }
        };

        if report {
            self.stats.log_scheduling(SchedulingReportedStats {
                job_id,
                result_code,
                scheduler_type: kind,
            });
        }
        result_code
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
