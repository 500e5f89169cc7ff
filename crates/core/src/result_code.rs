// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome taxonomy for job executions and scheduling attempts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved value for a field that has never been set. Distinct from 0.
pub const UNAVAILABLE: i64 = -1;

/// Stop reason reported when the OS did not supply one.
pub const UNAVAILABLE_STOP_REASON: i32 = -1;

/// Terminal outcome of one execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionResultCode {
    Successful,
    FailedWithRetry,
    FailedWithoutRetry,
    OnstopCalledWithRetry,
    OnstopCalledWithoutRetry,
    HaltedForUnknownReason,
    SkipForKillSwitchOn,
    SkipForUserConsentRevoked,
    SkipForExtservicesJobOnTplus,
}

impl ExecutionResultCode {
    /// Outcome of a job that ran to completion.
    pub fn finished(success: bool, should_retry: bool) -> Self {
        match (success, should_retry) {
            (true, _) => Self::Successful,
            (false, true) => Self::FailedWithRetry,
            (false, false) => Self::FailedWithoutRetry,
        }
    }

    /// Outcome of a job interrupted by the OS.
    pub fn stopped(should_retry: bool) -> Self {
        if should_retry {
            Self::OnstopCalledWithRetry
        } else {
            Self::OnstopCalledWithoutRetry
        }
    }

    /// Numeric code used on the telemetry wire.
    pub fn code(self) -> i32 {
        match self {
            Self::Successful => 1,
            Self::FailedWithRetry => 2,
            Self::FailedWithoutRetry => 3,
            Self::OnstopCalledWithRetry => 4,
            Self::OnstopCalledWithoutRetry => 5,
            Self::HaltedForUnknownReason => 6,
            Self::SkipForKillSwitchOn => 7,
            Self::SkipForUserConsentRevoked => 8,
            Self::SkipForExtservicesJobOnTplus => 9,
        }
    }
}

impl fmt::Display for ExecutionResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Successful => "successful",
            Self::FailedWithRetry => "failed_with_retry",
            Self::FailedWithoutRetry => "failed_without_retry",
            Self::OnstopCalledWithRetry => "onstop_called_with_retry",
            Self::OnstopCalledWithoutRetry => "onstop_called_without_retry",
            Self::HaltedForUnknownReason => "halted_for_unknown_reason",
            Self::SkipForKillSwitchOn => "skip_for_kill_switch_on",
            Self::SkipForUserConsentRevoked => "skip_for_user_consent_revoked",
            Self::SkipForExtservicesJobOnTplus => "skip_for_extservices_job_on_tplus",
        };
        f.write_str(name)
    }
}

/// Why a job was deliberately not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    KillSwitchOn,
    UserConsentRevoked,
    ExtservicesJobOnTplus,
}

impl SkipReason {
    pub fn result_code(self) -> ExecutionResultCode {
        match self {
            Self::KillSwitchOn => ExecutionResultCode::SkipForKillSwitchOn,
            Self::UserConsentRevoked => ExecutionResultCode::SkipForUserConsentRevoked,
            Self::ExtservicesJobOnTplus => ExecutionResultCode::SkipForExtservicesJobOnTplus,
        }
    }
}

/// Outcome of asking a scheduler to register a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulingResultCode {
    Successful,
    Failed,
    Skipped,
}

/// Which scheduling implementation handled a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulerType {
    Legacy,
    Policy,
}

impl fmt::Display for SchedulerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Policy => f.write_str("policy"),
        }
    }
}

#[cfg(test)]
#[path = "result_code_tests.rs"]
mod tests;
