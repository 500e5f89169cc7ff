// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use crate::subprocess::WORKER_COMMAND_TIMEOUT;
use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Default worker command timeout (default: 10 minutes).
pub fn worker_timeout() -> Duration {
    parse_duration_ms("BGJOB_WORKER_TIMEOUT_MS").unwrap_or(WORKER_COMMAND_TIMEOUT)
}
