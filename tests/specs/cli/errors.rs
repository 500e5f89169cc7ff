//! CLI error handling specs

use crate::prelude::*;

#[test]
fn unknown_job_is_an_error() {
    let project = Project::empty();
    project
        .bgjob()
        .args(&["start", "NOT_A_JOB"])
        .fails()
        .stderr_has("unknown job: NOT_A_JOB");
}

#[test]
fn worker_for_unknown_job_is_a_config_error() {
    let project = Project::with_config(
        r#"
[workers.NOT_A_JOB]
command = "true"
"#,
    );
    project
        .bgjob()
        .args(&["jobs"])
        .fails()
        .stderr_has("worker defined for unknown job NOT_A_JOB");
}

#[test]
fn invalid_config_names_the_file() {
    let project = Project::with_config("[workers.MAINTENANCE_JOB]\ncommand = 7\n");
    project
        .bgjob()
        .args(&["jobs"])
        .fails()
        .stderr_has("bgjob.toml");
}

#[test]
fn invalid_skip_reason_is_rejected() {
    let project = Project::empty();
    project
        .bgjob()
        .args(&["skip", "2", "--reason", "bored"])
        .fails()
        .stderr_has("invalid value 'bored'");
}
