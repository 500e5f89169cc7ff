//! Ledger inspection and persistence specs

use crate::prelude::*;

#[test]
fn ledger_json_exposes_timing() {
    let project = Project::with_config(MIGRATED_CONFIG);
    project.bgjob().args(&["run", "9"]).passes();

    let rows = project
        .bgjob()
        .args(&["-o", "json", "ledger"])
        .passes()
        .json();

    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 9);
    assert_eq!(rows[0]["name"], "FLEDGE_BACKGROUND_FETCH_JOB");
    assert_eq!(rows[0]["running"], false);
    assert!(rows[0]["start_ms"].as_i64().unwrap() <= rows[0]["stop_ms"].as_i64().unwrap());
    assert!(rows[0]["period_ms"].is_null());
}

#[test]
fn ledger_file_is_versioned_json() {
    let project = Project::with_config(MIGRATED_CONFIG);
    project.bgjob().args(&["start", "9"]).passes();

    let file: serde_json::Value = serde_json::from_str(&project.read("ledger.json")).unwrap();
    assert_eq!(file["version"], 1);
    assert_eq!(file["entries"]["9_period"], -1);
    assert!(file["entries"]["9_start"].as_i64().unwrap() > 0);
}

#[test]
fn corrupt_ledger_is_moved_aside() {
    let project = Project::with_config(MIGRATED_CONFIG);
    project.file("ledger.json", "{not json");

    project
        .bgjob()
        .args(&["ledger"])
        .passes()
        .stdout_has("No executions recorded");

    assert_eq!(project.read("ledger.bak"), "{not json");
}

#[test]
fn unknown_job_in_ledger_query_fails() {
    let project = Project::empty();
    project
        .bgjob()
        .args(&["ledger", "404"])
        .fails()
        .stderr_has("unknown job: 404");
}
