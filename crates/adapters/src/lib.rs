// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: telemetry, schedulers, flags and job bodies

mod env;
pub mod flags;
pub mod scheduler;
pub mod stats;
pub mod subprocess;
pub mod traced;
pub mod worker;

pub use flags::{FlagsError, TomlFlagSource};
pub use scheduler::{FileJobScheduler, JobScheduler, SchedulerError};
pub use stats::{JsonlStatsSink, StatsLine, StatsSink};
pub use traced::{TracedScheduler, TracedStatsSink};
pub use worker::{CommandWorker, ExecutionOutcome, Worker};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use flags::FakeFlagSource;
#[cfg(any(test, feature = "test-support"))]
pub use scheduler::{FakeJobScheduler, SchedulerCall};
#[cfg(any(test, feature = "test-support"))]
pub use stats::{FakeStatsSink, StatsCall};
#[cfg(any(test, feature = "test-support"))]
pub use worker::FakeWorker;
