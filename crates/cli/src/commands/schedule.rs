// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bgjob schedule`: register jobs on their current path

use anyhow::{bail, Result};
use bgjob_core::{JobId, SchedulingResultCode};
use clap::Args;
use serde::Serialize;

use crate::app::App;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct ScheduleArgs {
    /// Job name or id
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub job: Option<String>,

    /// Schedule every registered job
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Serialize)]
struct ScheduleRow {
    id: JobId,
    name: String,
    result: SchedulingResultCode,
}

pub fn handle(app: &App, args: ScheduleArgs, format: OutputFormat) -> Result<()> {
    let jobs: Vec<_> = match &args.job {
        Some(key) => vec![app.job(key)?.clone()],
        None => app.registry.iter().cloned().collect(),
    };

    let rows: Vec<ScheduleRow> = jobs
        .into_iter()
        .map(|job| ScheduleRow {
            result: app.service.schedule(job.id),
            id: job.id,
            name: job.name,
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Text => {
            for row in &rows {
                println!("{} ({}): {}", row.name, row.id, result_label(row.result));
            }
        }
    }

    let failed = rows
        .iter()
        .filter(|r| r.result == SchedulingResultCode::Failed)
        .count();
    if failed > 0 {
        bail!("{failed} job(s) failed to schedule");
    }
    Ok(())
}

fn result_label(result: SchedulingResultCode) -> &'static str {
    match result {
        SchedulingResultCode::Successful => "scheduled",
        SchedulingResultCode::Failed => "failed",
        SchedulingResultCode::Skipped => "skipped",
    }
}
