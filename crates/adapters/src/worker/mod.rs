// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job body implementations.

mod command;

pub use command::CommandWorker;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeWorker;

use async_trait::async_trait;

/// Result of running a job body once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub success: bool,
    pub should_retry: bool,
}

impl ExecutionOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            should_retry: false,
        }
    }

    pub fn failure(should_retry: bool) -> Self {
        Self {
            success: false,
            should_retry,
        }
    }
}

/// The work performed when a job fires.
#[async_trait]
pub trait Worker: Send + Sync {
    async fn execute(&self) -> ExecutionOutcome;
}
