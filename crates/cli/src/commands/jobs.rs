// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bgjob jobs`: registry with routing and registration state

use anyhow::Result;
use bgjob_core::{FlagSource, Flags, JobDescriptor, JobId, SchedulerType};
use bgjob_engine::{MigrationBatch, SchedulingDecision};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::app::App;
use crate::output::{print_json, OutputFormat};
use crate::table::{Column, Table};

#[derive(Debug, Serialize)]
pub struct JobRow {
    pub id: JobId,
    pub name: String,
    pub batch: Option<String>,
    pub path: SchedulerType,
    pub scheduled_legacy: bool,
    pub scheduled_policy: bool,
}

pub fn handle(app: &App, format: OutputFormat) -> Result<()> {
    let flags = app.flags.flags();
    let legacy = app.legacy.scheduled()?;
    let policy = app.policy.scheduled()?;

    let rows: Vec<JobRow> = app
        .registry
        .iter()
        .map(|job| job_row(job, &flags, &legacy, &policy))
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Text => {
            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("NAME"),
                Column::left("BATCH"),
                Column::left("PATH"),
                Column::left("SCHEDULED"),
            ]);
            for row in &rows {
                table.row(vec![
                    row.id.to_string(),
                    row.name.clone(),
                    row.batch.clone().unwrap_or_else(|| "-".to_string()),
                    row.path.to_string(),
                    scheduled_cell(row).to_string(),
                ]);
            }
            table.render(&mut std::io::stdout());
        }
    }
    Ok(())
}

fn job_row(
    job: &JobDescriptor,
    flags: &Flags,
    legacy: &BTreeMap<JobId, String>,
    policy: &BTreeMap<JobId, String>,
) -> JobRow {
    let path = if SchedulingDecision::for_job(job.id, flags).use_legacy_path {
        SchedulerType::Legacy
    } else {
        SchedulerType::Policy
    };
    JobRow {
        id: job.id,
        name: job.name.clone(),
        batch: MigrationBatch::classify(job.id).map(|b| b.to_string()),
        path,
        scheduled_legacy: legacy.contains_key(&job.id),
        scheduled_policy: policy.contains_key(&job.id),
    }
}

fn scheduled_cell(row: &JobRow) -> &'static str {
    match (row.scheduled_legacy, row.scheduled_policy) {
        (true, true) => "both",
        (true, false) => "legacy",
        (false, true) => "policy",
        (false, false) => "-",
    }
}
