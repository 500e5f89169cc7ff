//! CLI help and version specs

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    let project = Project::empty();
    let run = project.bgjob().args(&["--help"]).passes();
    for command in ["jobs", "ledger", "run", "start", "finish", "stop", "skip", "schedule"] {
        assert!(
            run.stdout().contains(command),
            "help is missing {command}\n{}",
            run.stdout()
        );
    }
}

#[test]
fn version_prints_crate_version() {
    let project = Project::empty();
    project
        .bgjob()
        .args(&["--version"])
        .passes()
        .stdout_has("bgjob ");
}
