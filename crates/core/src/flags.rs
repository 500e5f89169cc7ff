// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Feature flags and platform facts consumed by the dispatcher and logger.
//!
//! Flags are read through a [`FlagSource`] on every call; nothing caches a
//! snapshot across calls, so a flag flip takes effect on the next callback.

use serde::{Deserialize, Serialize};

/// First SDK level that reports an OS stop reason to `on_stop_job`.
pub const SDK_S: u32 = 31;

/// First SDK level on which back-compat (ExtServices) jobs are disabled.
pub const SDK_T: u32 = 33;

/// Device and build facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    pub sdk_level: u32,
    /// Running as the back-compat ExtServices build rather than the
    /// platform module.
    pub ext_services: bool,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            sdk_level: 34,
            ext_services: false,
        }
    }
}

impl Platform {
    /// Back-compat builds must not run jobs once the platform module owns them.
    pub fn back_compat_disabled(&self) -> bool {
        self.ext_services && self.sdk_level >= SDK_T
    }

    pub fn supports_stop_reason(&self) -> bool {
        self.sdk_level >= SDK_S
    }
}

/// Snapshot of every flag the scheduling layer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    /// Global kill-switch for execution logging and telemetry.
    pub job_logging_disabled: bool,
    /// Percentage (0-100) of executions whose telemetry is emitted.
    pub logging_sampling_rate: u32,
    /// Migrates the first batch of jobs to the policy path.
    pub spe_pilot_jobs_enabled: bool,
    /// Migrates the second batch of jobs to the policy path.
    pub spe_jobs_batch2_enabled: bool,
    pub platform: Platform,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            job_logging_disabled: false,
            logging_sampling_rate: 100,
            spe_pilot_jobs_enabled: false,
            spe_jobs_batch2_enabled: false,
            platform: Platform::default(),
        }
    }
}

/// Accessor polled on every scheduling or logging call.
pub trait FlagSource: Clone + Send + Sync + 'static {
    fn flags(&self) -> Flags;
}

/// Flags fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticFlags(pub Flags);

impl FlagSource for StaticFlags {
    fn flags(&self) -> Flags {
        self.0.clone()
    }
}

#[cfg(test)]
#[path = "flags_tests.rs"]
mod tests;
