// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Migration batches: groups of jobs moved from the legacy scheduling path
//! to the policy path together, each gated by one flag.
//!
//! A job id is expected to belong to at most one batch. This is not
//! checked at runtime; classification takes the first batch in
//! [`MigrationBatch::ALL`] that lists the id.

use bgjob_core::{Flags, JobId};
use std::fmt;

const PILOT_JOBS: &[JobId] = &[JobId(11), JobId(12), JobId(13), JobId(14)];

const SECOND_BATCH_JOBS: &[JobId] = &[JobId(1), JobId(2), JobId(16)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationBatch {
    /// Download-manager periodic tasks.
    Pilot,
    Second,
}

impl MigrationBatch {
    /// Batches in classification priority order.
    pub const ALL: [MigrationBatch; 2] = [MigrationBatch::Pilot, MigrationBatch::Second];

    pub fn jobs(self) -> &'static [JobId] {
        match self {
            Self::Pilot => PILOT_JOBS,
            Self::Second => SECOND_BATCH_JOBS,
        }
    }

    pub fn classify(job_id: JobId) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|batch| batch.jobs().contains(&job_id))
    }

    /// Whether this batch runs on the policy path.
    pub fn enabled(self, flags: &Flags) -> bool {
        match self {
            Self::Pilot => flags.spe_pilot_jobs_enabled,
            Self::Second => flags.spe_jobs_batch2_enabled,
        }
    }
}

impl fmt::Display for MigrationBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pilot => f.write_str("pilot"),
            Self::Second => f.write_str("second"),
        }
    }
}

/// Per-call routing decision. Recomputed from the current flags on every
/// dispatch; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingDecision {
    pub use_legacy_path: bool,
}

impl SchedulingDecision {
    /// Jobs outside every batch always take the policy path.
    pub fn for_job(job_id: JobId, flags: &Flags) -> Self {
        let use_legacy_path =
            MigrationBatch::classify(job_id).is_some_and(|batch| !batch.enabled(flags));
        Self { use_legacy_path }
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
