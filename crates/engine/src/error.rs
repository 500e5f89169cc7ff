// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for engine construction

use bgjob_core::JobId;
use thiserror::Error;

/// Errors raised while wiring the engine. Job callbacks never return these.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("worker already registered for job {0}")]
    DuplicateWorker(JobId),
}
