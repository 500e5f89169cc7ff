//! Scheduling path routing specs

use crate::prelude::*;

#[test]
fn jobs_lists_builtin_registry_with_paths() {
    let project = Project::empty();
    let jobs = project.bgjob().args(&["-o", "json", "jobs"]).passes().json();

    let jobs = jobs.as_array().unwrap();
    assert_eq!(jobs.len(), 18);
    assert_eq!(jobs[0]["name"], "MAINTENANCE_JOB");
    assert_eq!(jobs[0]["batch"], "second");
    assert_eq!(jobs[0]["path"], "LEGACY");
    // Unbatched jobs always take the policy path.
    assert_eq!(jobs[8]["name"], "FLEDGE_BACKGROUND_FETCH_JOB");
    assert_eq!(jobs[8]["path"], "POLICY");
}

#[test]
fn pilot_job_with_flag_off_is_delegated() {
    let project = Project::with_config(
        r#"
[workers.MDD_MAINTENANCE_PERIODIC_TASK_JOB]
command = "touch ran"
"#,
    );

    project
        .bgjob()
        .args(&["run", "11"])
        .passes()
        .stdout_has("delegated to legacy scheduler");

    assert!(!project.state_path().join("ran").exists());
    assert!(project.read("schedulers/legacy.json").contains("11"));
    project
        .bgjob()
        .args(&["ledger"])
        .passes()
        .stdout_has("No executions recorded");
}

#[test]
fn back_compat_build_on_t_does_not_execute() {
    let project = Project::with_config(
        r#"
spe_jobs_batch2_enabled = true

[platform]
sdk_level = 33
ext_services = true

[workers.TOPICS_EPOCH_JOB]
command = "true"
"#,
    );

    project
        .bgjob()
        .args(&["run", "TOPICS_EPOCH_JOB"])
        .passes()
        .stdout_has("not executed");

    assert!(project.stats().is_empty());
    project
        .bgjob()
        .args(&["ledger"])
        .passes()
        .stdout_has("No executions recorded");
}

#[test]
fn missing_worker_is_reported_to_telemetry() {
    let project = Project::empty();

    project
        .bgjob()
        .args(&["run", "9"])
        .passes()
        .stdout_has("no worker");

    let stats = project.stats();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["kind"], "error");
    assert_eq!(stats[0]["code"], "WORKER_NOT_FOUND");
    assert_eq!(stats[0]["job_id"], 9);
}

#[test]
fn schedule_switches_registration_when_flag_flips() {
    let project = Project::empty();

    project.bgjob().args(&["schedule", "12"]).passes().stdout_has("scheduled");
    assert!(project.read("schedulers/legacy.json").contains("12"));

    project.file("bgjob.toml", "spe_pilot_jobs_enabled = true\n");
    project.bgjob().args(&["schedule", "12"]).passes();

    assert!(!project.read("schedulers/legacy.json").contains("12"));
    assert!(project.read("schedulers/policy.json").contains("12"));

    let kinds: Vec<_> = project
        .stats()
        .iter()
        .map(|s| s["scheduler_type"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(kinds, vec!["LEGACY", "POLICY"]);
}

#[test]
fn schedule_all_registers_every_job() {
    let project = Project::with_config(MIGRATED_CONFIG);
    let rows = project
        .bgjob()
        .args(&["-o", "json", "schedule", "--all"])
        .passes()
        .json();

    assert_eq!(rows.as_array().unwrap().len(), 18);
    let scheduled = project.bgjob().args(&["-o", "json", "jobs"]).passes().json();
    assert!(scheduled
        .as_array()
        .unwrap()
        .iter()
        .all(|job| job["scheduled_policy"] == true && job["scheduled_legacy"] == false));
}
