// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bgjob-core: job registry, outcome taxonomy and telemetry shapes shared
//! by the storage, adapter and engine crates.

pub mod clock;
pub mod flags;
pub mod job_info;
pub mod result_code;
pub mod stats;

pub use clock::{Clock, SystemClock};

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use flags::{FlagSource, Flags, Platform, StaticFlags, SDK_S, SDK_T};
pub use job_info::{JobDescriptor, JobId, JobRegistry, RegistryError, BUILTIN_JOBS};
pub use result_code::{
    ExecutionResultCode, SchedulerType, SchedulingResultCode, SkipReason, UNAVAILABLE,
    UNAVAILABLE_STOP_REASON,
};
pub use stats::{ErrorCode, ErrorReport, ExecutionReportedStats, SchedulingReportedStats};
