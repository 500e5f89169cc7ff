// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bgjob ledger`: recorded execution timing

use anyhow::Result;
use bgjob_core::JobId;
use bgjob_storage::ExecutionRecord;
use serde::Serialize;

use crate::app::App;
use crate::output::{format_epoch_ms, format_span_ms, print_json, OutputFormat};
use crate::table::{Column, Table};

#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    id: JobId,
    name: &'a str,
    #[serde(flatten)]
    record: ExecutionRecord,
    running: bool,
}

pub fn handle(app: &App, job: Option<String>, format: OutputFormat) -> Result<()> {
    let ledger = app.service.logger().ledger();
    let records: Vec<(JobId, ExecutionRecord)> = match job {
        Some(key) => {
            let job = app.job(&key)?;
            vec![(job.id, ledger.record(job.id))]
        }
        None => ledger.records().into_iter().collect(),
    };

    let rows: Vec<LedgerRow<'_>> = records
        .into_iter()
        .map(|(id, record)| LedgerRow {
            id,
            name: app.registry.name(id).unwrap_or("?"),
            record,
            running: record.is_running(),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("No executions recorded");
                return Ok(());
            }
            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("NAME"),
                Column::left("START"),
                Column::left("STOP"),
                Column::right("PERIOD"),
                Column::left("STATE"),
            ]);
            for row in &rows {
                table.row(vec![
                    row.id.to_string(),
                    row.name.to_string(),
                    format_epoch_ms(row.record.start_ms),
                    format_epoch_ms(row.record.stop_ms),
                    format_span_ms(row.record.period_ms),
                    state_cell(&row.record).to_string(),
                ]);
            }
            table.render(&mut std::io::stdout());
        }
    }
    Ok(())
}

fn state_cell(record: &ExecutionRecord) -> &'static str {
    if record.is_running() {
        "running"
    } else if record.start_ms.is_some() {
        "stopped"
    } else {
        "never run"
    }
}
