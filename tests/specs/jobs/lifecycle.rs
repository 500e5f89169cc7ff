//! Job lifecycle recording specs

use crate::prelude::*;

#[test]
fn run_records_successful_execution() {
    let project = Project::with_config(MIGRATED_CONFIG);

    project
        .bgjob()
        .args(&["run", "FLEDGE_BACKGROUND_FETCH_JOB"])
        .passes()
        .stdout_has("finished, success");

    let stats = project.stats();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["kind"], "execution");
    assert_eq!(stats[0]["result_code"], "SUCCESSFUL");
    assert_eq!(stats[0]["period_ms"], -1);
    assert_eq!(stats[0]["stop_reason"], -1);
    assert!(stats[0]["latency_ms"].as_i64().unwrap() >= 0);
}

#[test]
fn failing_worker_records_failure_with_retry() {
    let project = Project::with_config(MIGRATED_CONFIG);

    project
        .bgjob()
        .args(&["run", "MAINTENANCE_JOB"])
        .passes()
        .stdout_has("failure, retry");

    let stats = project.stats();
    assert_eq!(stats[0]["result_code"], "FAILED_WITH_RETRY");
    assert_eq!(stats[0]["stop_reason"], -1);
}

#[test]
fn second_run_reports_period() {
    let project = Project::with_config(MIGRATED_CONFIG);

    project.bgjob().args(&["run", "9"]).passes();
    project.bgjob().args(&["run", "9"]).passes();

    let stats = project.stats();
    assert_eq!(stats.len(), 2);
    assert!(stats[1]["period_ms"].as_i64().unwrap() >= 0);
}

#[test]
fn start_then_finish_pairs_across_invocations() {
    let project = Project::with_config(MIGRATED_CONFIG);

    project.bgjob().args(&["start", "9"]).passes().stdout_has("started");
    project
        .bgjob()
        .args(&["ledger", "9"])
        .passes()
        .stdout_has("running");

    project
        .bgjob()
        .args(&["finish", "9", "--retry"])
        .passes();

    let stats = project.stats();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["result_code"], "FAILED_WITH_RETRY");
    project
        .bgjob()
        .args(&["ledger", "9"])
        .passes()
        .stdout_has("stopped");
}

#[test]
fn stop_uses_worker_stop_policy_and_os_reason() {
    let project = Project::with_config(MIGRATED_CONFIG);

    project.bgjob().args(&["start", "MAINTENANCE_JOB"]).passes();
    project
        .bgjob()
        .args(&["stop", "MAINTENANCE_JOB", "--reason", "4"])
        .passes()
        .stdout_has("no retry");

    let stats = project.stats();
    assert_eq!(stats[0]["result_code"], "ONSTOP_CALLED_WITHOUT_RETRY");
    assert_eq!(stats[0]["stop_reason"], 4);
}

#[test]
fn unfinished_start_is_reported_halted() {
    let project = Project::with_config(MIGRATED_CONFIG);

    project.bgjob().args(&["start", "9"]).passes();
    project.bgjob().args(&["start", "9"]).passes();

    let stats = project.stats();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["result_code"], "HALTED_FOR_UNKNOWN_REASON");
    assert_eq!(stats[0]["latency_ms"], -1);
}

#[test]
fn finish_without_start_records_nothing() {
    let project = Project::with_config(MIGRATED_CONFIG);

    project.bgjob().args(&["finish", "9", "--success"]).passes();

    assert!(project.stats().is_empty());
}

#[test]
fn skip_records_skip_result() {
    let project = Project::empty();

    project
        .bgjob()
        .args(&["skip", "3", "--reason", "consent-revoked"])
        .passes()
        .stdout_has("skipped");

    let stats = project.stats();
    assert_eq!(stats[0]["result_code"], "SKIP_FOR_USER_CONSENT_REVOKED");
}

#[test]
fn kill_switch_disables_recording() {
    let project = Project::with_config(&format!("job_logging_disabled = true\n{MIGRATED_CONFIG}"));

    project.bgjob().args(&["run", "9"]).passes();

    assert!(project.stats().is_empty());
    project
        .bgjob()
        .args(&["ledger"])
        .passes()
        .stdout_has("No executions recorded");
}
