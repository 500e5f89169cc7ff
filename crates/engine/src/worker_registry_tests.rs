// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bgjob_adapters::{ExecutionOutcome, FakeWorker};

#[tokio::test]
async fn resolve_builds_a_fresh_worker() {
    let fake = FakeWorker::new(ExecutionOutcome::success());
    let mut registry = WorkerRegistry::new();
    let handle = fake.clone();
    registry.register(JobId(2), move || handle.clone()).unwrap();

    let worker = registry.resolve(JobId(2)).unwrap();
    assert_eq!(worker.execute().await, ExecutionOutcome::success());
    assert_eq!(fake.runs(), 1);
}

#[test]
fn unknown_job_resolves_to_none() {
    let registry = WorkerRegistry::new();
    assert!(registry.resolve(JobId(2)).is_none());
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = WorkerRegistry::new();
    registry
        .register(JobId(2), || FakeWorker::new(ExecutionOutcome::success()))
        .unwrap();

    let err = registry
        .register(JobId(2), || FakeWorker::new(ExecutionOutcome::failure(true)))
        .unwrap_err();

    assert!(matches!(err, EngineError::DuplicateWorker(JobId(2))));
    assert!(registry.resolve(JobId(2)).is_some());
}

#[test]
fn stop_policy_defaults_to_retry() {
    let mut registry = WorkerRegistry::new();
    registry
        .register(JobId(1), || FakeWorker::new(ExecutionOutcome::success()))
        .unwrap();
    registry
        .register_with_stop_policy(JobId(2), false, || {
            FakeWorker::new(ExecutionOutcome::success())
        })
        .unwrap();

    assert!(registry.retry_on_stop(JobId(1)));
    assert!(!registry.retry_on_stop(JobId(2)));
    assert!(registry.retry_on_stop(JobId(3)));
}
