// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn builtin_table_has_unique_ids_and_names() {
    let registry = JobRegistry::builtin().unwrap();
    assert_eq!(registry.iter().count(), BUILTIN_JOBS.len());
}

#[test]
fn resolve_by_id_and_name() {
    let registry = JobRegistry::builtin().unwrap();

    let topics = registry.resolve(JobId(2)).unwrap();
    assert_eq!(topics.name, "TOPICS_EPOCH_JOB");
    assert_eq!(registry.name(JobId(11)), Some("MDD_MAINTENANCE_PERIODIC_TASK_JOB"));

    let by_name = registry.find_by_name("FLEDGE_BACKGROUND_FETCH_JOB").unwrap();
    assert_eq!(by_name.id, JobId(9));
}

#[test]
fn unknown_id_resolves_to_none() {
    let registry = JobRegistry::builtin().unwrap();
    assert!(registry.resolve(JobId(999)).is_none());
    assert!(registry.name(JobId(-1)).is_none());
    assert!(registry.find_by_name("NOT_A_JOB").is_none());
}

#[test]
fn duplicate_id_is_rejected() {
    let err = JobRegistry::new([("A", 1), ("B", 2), ("C", 1)]).unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateId {
            id: JobId(1),
            first: "A".to_string(),
            second: "C".to_string(),
        }
    );
}

#[test]
fn duplicate_name_is_rejected() {
    let err = JobRegistry::new([("A", 1), ("A", 2)]).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName { ref name, .. } if name == "A"));
}

#[test]
fn iter_is_ordered_by_id() {
    let registry = JobRegistry::new([("C", 30), ("A", 10), ("B", 20)]).unwrap();
    let ids: Vec<i32> = registry.iter().map(|d| d.id.0).collect();
    assert_eq!(ids, vec![10, 20, 30]);
}

#[test]
fn job_id_serializes_as_plain_integer() {
    let json = serde_json::to_string(&JobId(7)).unwrap();
    assert_eq!(json, "7");
}
