// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_helpers::{workers_with, TestContext};
use bgjob_adapters::{ExecutionOutcome, FakeWorker};
use bgjob_core::{ExecutionResultCode, Flags, Platform, UNAVAILABLE, UNAVAILABLE_STOP_REASON};

#[tokio::test]
async fn on_start_job_runs_worker_and_records_outcome() {
    let ctx = TestContext::new();
    let (workers, fake) = workers_with(JobId(9), ExecutionOutcome::failure(true));
    let service = ctx.service(workers);

    assert!(service.on_start_job(JobId(9)).await);

    assert_eq!(fake.runs(), 1);
    let stats = ctx.stats.executions();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].job_id, JobId(9));
    assert_eq!(stats[0].result_code, ExecutionResultCode::FailedWithRetry);
    assert_eq!(stats[0].period_ms, UNAVAILABLE);
    assert_eq!(stats[0].stop_reason, UNAVAILABLE_STOP_REASON);
}

#[tokio::test]
async fn delegated_job_leaves_ledger_untouched() {
    let ctx = TestContext::with_flags(Flags::default());
    let (workers, fake) = workers_with(JobId(11), ExecutionOutcome::success());
    let service = ctx.service(workers);

    assert!(!service.on_start_job(JobId(11)).await);

    assert_eq!(fake.runs(), 0);
    assert!(ctx.ledger.records().is_empty());
}

#[tokio::test]
async fn not_executed_job_leaves_ledger_untouched() {
    let ctx = TestContext::new();
    ctx.flags.update(|f| {
        f.platform = Platform {
            sdk_level: 33,
            ext_services: true,
        }
    });
    let (workers, _fake) = workers_with(JobId(2), ExecutionOutcome::success());
    let service = ctx.service(workers);

    assert!(!service.on_start_job(JobId(2)).await);
    assert!(ctx.ledger.records().is_empty());
    assert!(ctx.stats.calls().is_empty());
}

#[test]
fn stop_uses_registered_retry_policy() {
    let ctx = TestContext::new();
    let mut workers = WorkerRegistry::new();
    workers
        .register_with_stop_policy(JobId(4), false, || {
            FakeWorker::new(ExecutionOutcome::success())
        })
        .unwrap();
    let service = ctx.service(workers);

    assert!(service.start_job(JobId(4)).is_execute());
    assert!(!service.on_stop_job(JobId(4), Some(7)));

    let stats = ctx.stats.executions();
    assert_eq!(stats[0].result_code, ExecutionResultCode::OnstopCalledWithoutRetry);
    assert_eq!(stats[0].stop_reason, 7);
}

#[test]
fn skip_records_start_and_skip() {
    let ctx = TestContext::new();
    let service = ctx.service(WorkerRegistry::new());

    service.skip_job(JobId(3), SkipReason::KillSwitchOn);

    let stats = ctx.stats.executions();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].result_code, ExecutionResultCode::SkipForKillSwitchOn);
    assert!(!ctx.ledger.record(JobId(3)).is_running());
}

#[test]
fn schedule_goes_through_dispatcher() {
    let ctx = TestContext::new();
    let service = ctx.service(WorkerRegistry::new());

    assert_eq!(service.schedule(JobId(16)), SchedulingResultCode::Successful);
    assert!(ctx.policy.is_scheduled(JobId(16)));
}
