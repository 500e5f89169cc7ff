// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bgjob scheduling engine: migration batches, dispatch, execution logging

pub mod batch;
mod dispatcher;
mod error;
mod logger;
mod service;
mod worker_registry;

#[cfg(test)]
mod test_helpers;

pub use batch::{MigrationBatch, SchedulingDecision};
pub use dispatcher::{Dispatch, JobDispatcher};
pub use error::EngineError;
pub use logger::{BackgroundQueue, JobServiceLogger, LogExecutor};
pub use service::{JobService, JobServiceDeps};
pub use worker_registry::WorkerRegistry;
