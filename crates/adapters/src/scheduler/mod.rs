// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job scheduler adapters.
//!
//! The OS scheduler itself is out of reach; these adapters register and
//! cancel jobs with whatever backs a scheduling path.

mod file;

pub use file::FileJobScheduler;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeJobScheduler, SchedulerCall};

use bgjob_core::{JobDescriptor, JobId};
use thiserror::Error;

/// Errors from scheduler operations
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scheduler rejected job {job_id}: {message}")]
    Rejected { job_id: JobId, message: String },
}

/// Registration surface of one scheduling path.
pub trait JobScheduler: Clone + Send + Sync + 'static {
    /// Register (or re-register) a job.
    fn schedule(&self, job: &JobDescriptor) -> Result<(), SchedulerError>;

    /// Remove a job's registration. Cancelling an unknown job is not an error.
    fn cancel(&self, job_id: JobId) -> Result<(), SchedulerError>;

    fn is_scheduled(&self, job_id: JobId) -> bool;
}
