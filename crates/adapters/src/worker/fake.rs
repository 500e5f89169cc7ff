// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake worker for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ExecutionOutcome, Worker};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Worker returning a fixed outcome and counting executions.
///
/// Clones share the counter, so a test can keep one handle while a
/// factory hands out others.
#[derive(Clone)]
pub struct FakeWorker {
    outcome: ExecutionOutcome,
    runs: Arc<AtomicUsize>,
}

impl FakeWorker {
    pub fn new(outcome: ExecutionOutcome) -> Self {
        Self {
            outcome,
            runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Worker for FakeWorker {
    async fn execute(&self) -> ExecutionOutcome {
        self.runs.fetch_add(1, Ordering::SeqCst);
        self.outcome
    }
}
