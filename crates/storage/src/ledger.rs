// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution ledger: per-job start/stop/period timestamps.
//!
//! Each job id `N` owns three keys in the store: `N_start`, `N_stop` and
//! `N_period`. The ledger computes latency and period from them and hands
//! back the telemetry the caller should emit; it never emits anything
//! itself and never fails. Store commit errors are logged and the
//! affected data point is lost.

use crate::kv::{KvStore, StoreError};
use bgjob_core::{
    ExecutionReportedStats, ExecutionResultCode, JobId, UNAVAILABLE, UNAVAILABLE_STOP_REASON,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{error, warn};

const START_SUFFIX: &str = "start";
const STOP_SUFFIX: &str = "stop";
const PERIOD_SUFFIX: &str = "period";

fn start_key(job_id: JobId) -> String {
    format!("{job_id}_{START_SUFFIX}")
}

fn stop_key(job_id: JobId) -> String {
    format!("{job_id}_{STOP_SUFFIX}")
}

fn period_key(job_id: JobId) -> String {
    format!("{job_id}_{PERIOD_SUFFIX}")
}

/// Sentinel-aware read: both a missing key and [`UNAVAILABLE`] are `None`.
fn available(value: Option<i64>) -> Option<i64> {
    value.filter(|&v| v != UNAVAILABLE)
}

/// Timing state of one job as stored in the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionRecord {
    pub start_ms: Option<i64>,
    pub stop_ms: Option<i64>,
    pub period_ms: Option<i64>,
}

impl ExecutionRecord {
    /// The last execution started and never reached a recorded stop.
    pub fn is_running(&self) -> bool {
        match (self.start_ms, self.stop_ms) {
            (Some(start), Some(stop)) => start > stop,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

/// Durable per-job execution timing.
pub struct ExecutionLedger {
    store: KvStore,
}

impl ExecutionLedger {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// Open a file-backed ledger.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(KvStore::open(path)?))
    }

    pub fn in_memory() -> Self {
        Self::new(KvStore::in_memory())
    }

    pub fn path(&self) -> Option<&Path> {
        self.store.path()
    }

    /// Record that `job_id` started at `now_ms`.
    ///
    /// Returns a `HaltedForUnknownReason` event when the previous execution
    /// started but never stopped (killed without either completion path
    /// running).
    pub fn record_start(&self, job_id: JobId, now_ms: i64) -> Option<ExecutionReportedStats> {
        let start_key = start_key(job_id);
        let period_key = period_key(job_id);

        let mut txn = self.store.begin();

        let halted = match available(txn.get(&start_key)) {
            None => {
                txn.put(period_key, UNAVAILABLE);
                None
            }
            Some(previous_start) => {
                let previous_stop = txn.get(&stop_key(job_id)).unwrap_or(UNAVAILABLE);
                let previous_period = txn.get(&period_key).unwrap_or(UNAVAILABLE);

                let halted = (previous_start > previous_stop).then(|| {
                    warn!(
                        job_id = %job_id,
                        previous_start,
                        previous_stop,
                        "previous execution never stopped",
                    );
                    ExecutionReportedStats {
                        job_id,
                        latency_ms: UNAVAILABLE,
                        period_ms: previous_period,
                        result_code: ExecutionResultCode::HaltedForUnknownReason,
                        stop_reason: UNAVAILABLE_STOP_REASON,
                    }
                });

                let period_ms = now_ms.checked_sub(previous_start).unwrap_or_else(|| {
                    warn!(job_id = %job_id, previous_start, "stored start out of range");
                    UNAVAILABLE
                });
                txn.put(period_key, period_ms);
                halted
            }
        };

        txn.put(start_key, now_ms);

        if let Err(e) = txn.commit() {
            error!(job_id = %job_id, error = %e, "failed to persist execution start");
        }

        halted
    }

    /// Record that `job_id` stopped at `now_ms` with the given outcome.
    ///
    /// Returns `None`, leaving the ledger untouched, when there is no start
    /// to pair with, the start lies in the future, or the stored start is
    /// too far back to measure.
    pub fn record_stop(
        &self,
        job_id: JobId,
        now_ms: i64,
        result_code: ExecutionResultCode,
        stop_reason: i32,
    ) -> Option<ExecutionReportedStats> {
        let mut txn = self.store.begin();

        let Some(start) = available(txn.get(&start_key(job_id))) else {
            error!(job_id = %job_id, %result_code, "stop recorded without a start");
            return None;
        };
        if start > now_ms {
            error!(
                job_id = %job_id,
                start,
                stop = now_ms,
                %result_code,
                "execution start is after stop",
            );
            return None;
        }

        let Some(latency_ms) = now_ms.checked_sub(start) else {
            error!(job_id = %job_id, start, %result_code, "stored start out of range");
            return None;
        };

        let period_ms = txn.get(&period_key(job_id)).unwrap_or(UNAVAILABLE);
        txn.put(stop_key(job_id), now_ms);

        if let Err(e) = txn.commit() {
            error!(job_id = %job_id, error = %e, "failed to persist execution stop");
        }

        Some(ExecutionReportedStats {
            job_id,
            latency_ms,
            period_ms,
            result_code,
            stop_reason,
        })
    }

    /// Current timing state of one job.
    pub fn record(&self, job_id: JobId) -> ExecutionRecord {
        ExecutionRecord {
            start_ms: available(self.store.get(&start_key(job_id))),
            stop_ms: available(self.store.get(&stop_key(job_id))),
            period_ms: available(self.store.get(&period_key(job_id))),
        }
    }

    /// Timing state of every job present in the store.
    pub fn records(&self) -> BTreeMap<JobId, ExecutionRecord> {
        let mut records: BTreeMap<JobId, ExecutionRecord> = BTreeMap::new();

        for (key, value) in self.store.snapshot() {
            let Some((id, suffix)) = key.split_once('_') else {
                continue;
            };
            let Ok(id) = id.parse::<i32>() else {
                continue;
            };
            let record = records.entry(JobId(id)).or_default();
            let value = available(Some(value));
            match suffix {
                START_SUFFIX => record.start_ms = value,
                STOP_SUFFIX => record.stop_ms = value,
                PERIOD_SUFFIX => record.period_ms = value,
                _ => {}
            }
        }

        records
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
