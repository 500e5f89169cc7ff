// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake job scheduler for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{JobScheduler, SchedulerError};
use bgjob_core::{JobDescriptor, JobId};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Recorded scheduler call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerCall {
    Schedule(JobId),
    Cancel(JobId),
}

#[derive(Default)]
struct FakeSchedulerState {
    calls: Vec<SchedulerCall>,
    scheduled: BTreeSet<JobId>,
    fail_schedule: bool,
}

/// Fake scheduler recording calls, with optional failure injection
#[derive(Clone, Default)]
pub struct FakeJobScheduler {
    inner: Arc<Mutex<FakeSchedulerState>>,
}

impl FakeJobScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SchedulerCall> {
        self.inner.lock().calls.clone()
    }

    /// Make every subsequent `schedule` call fail.
    pub fn set_fail_schedule(&self, fail: bool) {
        self.inner.lock().fail_schedule = fail;
    }
}

impl JobScheduler for FakeJobScheduler {
    fn schedule(&self, job: &JobDescriptor) -> Result<(), SchedulerError> {
        let mut state = self.inner.lock();
        state.calls.push(SchedulerCall::Schedule(job.id));
        if state.fail_schedule {
            return Err(SchedulerError::Rejected {
                job_id: job.id,
                message: "injected failure".to_string(),
            });
        }
        state.scheduled.insert(job.id);
        Ok(())
    }

    fn cancel(&self, job_id: JobId) -> Result<(), SchedulerError> {
        let mut state = self.inner.lock();
        state.calls.push(SchedulerCall::Cancel(job_id));
        state.scheduled.remove(&job_id);
        Ok(())
    }

    fn is_scheduled(&self, job_id: JobId) -> bool {
        self.inner.lock().scheduled.contains(&job_id)
    }
}
