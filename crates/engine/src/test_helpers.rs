// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{JobDispatcher, JobService, JobServiceDeps, JobServiceLogger, LogExecutor, WorkerRegistry};
use bgjob_adapters::{
    ExecutionOutcome, FakeFlagSource, FakeJobScheduler, FakeStatsSink, FakeWorker,
};
use bgjob_core::{FakeClock, Flags, JobId, JobRegistry};
use bgjob_storage::ExecutionLedger;
use std::sync::Arc;

pub(crate) type TestLogger = JobServiceLogger<FakeStatsSink, FakeFlagSource, FakeClock>;
pub(crate) type TestDispatcher = JobDispatcher<FakeJobScheduler, FakeStatsSink, FakeFlagSource>;
pub(crate) type TestService =
    JobService<FakeJobScheduler, FakeStatsSink, FakeFlagSource, FakeClock>;

/// Fakes shared by the component under test and the assertions.
pub(crate) struct TestContext {
    pub clock: FakeClock,
    pub flags: FakeFlagSource,
    pub stats: FakeStatsSink,
    pub legacy: FakeJobScheduler,
    pub policy: FakeJobScheduler,
    pub ledger: Arc<ExecutionLedger>,
}

impl TestContext {
    /// Default flags: logging on, full sampling, both batches migrated.
    pub fn new() -> Self {
        Self::with_flags(Flags {
            spe_pilot_jobs_enabled: true,
            spe_jobs_batch2_enabled: true,
            ..Flags::default()
        })
    }

    pub fn with_flags(flags: Flags) -> Self {
        Self {
            clock: FakeClock::new(),
            flags: FakeFlagSource::new(flags),
            stats: FakeStatsSink::new(),
            legacy: FakeJobScheduler::new(),
            policy: FakeJobScheduler::new(),
            ledger: Arc::new(ExecutionLedger::in_memory()),
        }
    }

    pub fn logger(&self) -> TestLogger {
        self.logger_with(LogExecutor::Inline)
    }

    pub fn logger_with(&self, executor: LogExecutor) -> TestLogger {
        JobServiceLogger::new(
            Arc::clone(&self.ledger),
            self.stats.clone(),
            self.flags.clone(),
            self.clock.clone(),
            executor,
        )
    }

    pub fn dispatcher(&self, workers: WorkerRegistry) -> TestDispatcher {
        JobDispatcher::new(
            Arc::new(builtin_registry()),
            Arc::new(workers),
            self.legacy.clone(),
            self.policy.clone(),
            self.stats.clone(),
            self.flags.clone(),
        )
    }

    pub fn service(&self, workers: WorkerRegistry) -> TestService {
        JobService::new(
            JobServiceDeps {
                legacy_scheduler: self.legacy.clone(),
                policy_scheduler: self.policy.clone(),
                stats: self.stats.clone(),
                flags: self.flags.clone(),
                clock: self.clock.clone(),
                ledger: Arc::clone(&self.ledger),
            },
            Arc::new(builtin_registry()),
            Arc::new(workers),
            LogExecutor::Inline,
        )
    }
}

pub(crate) fn builtin_registry() -> JobRegistry {
    JobRegistry::builtin().unwrap()
}

/// Registry with one fake worker; returns the shared handle for run counts.
pub(crate) fn workers_with(job_id: JobId, outcome: ExecutionOutcome) -> (WorkerRegistry, FakeWorker) {
    let fake = FakeWorker::new(outcome);
    let handle = fake.clone();
    let mut workers = WorkerRegistry::new();
    workers.register(job_id, move || handle.clone()).unwrap();
    (workers, fake)
}
