// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle callbacks: `run`, `start`, `finish`, `stop`, `skip`

use anyhow::Result;
use bgjob_core::{JobId, SkipReason};
use bgjob_engine::Dispatch;
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::app::App;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct FinishArgs {
    /// Job name or id
    pub job: String,

    /// The execution succeeded
    #[arg(long)]
    pub success: bool,

    /// Ask to be rescheduled
    #[arg(long)]
    pub retry: bool,
}

#[derive(Args)]
pub struct StopArgs {
    /// Job name or id
    pub job: String,

    /// Stop reason reported by the OS
    #[arg(long, allow_negative_numbers = true)]
    pub reason: Option<i32>,
}

#[derive(Args)]
pub struct SkipArgs {
    /// Job name or id
    pub job: String,

    #[arg(long, value_enum)]
    pub reason: SkipArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SkipArg {
    KillSwitch,
    ConsentRevoked,
    ExtServicesOnT,
}

impl From<SkipArg> for SkipReason {
    fn from(arg: SkipArg) -> Self {
        match arg {
            SkipArg::KillSwitch => SkipReason::KillSwitchOn,
            SkipArg::ConsentRevoked => SkipReason::UserConsentRevoked,
            SkipArg::ExtServicesOnT => SkipReason::ExtservicesJobOnTplus,
        }
    }
}

#[derive(Debug, Serialize)]
struct LifecycleReport {
    id: JobId,
    name: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry: Option<bool>,
}

impl LifecycleReport {
    fn new(app: &App, id: JobId, status: &'static str) -> Self {
        Self {
            id,
            name: app.registry.name(id).unwrap_or("?").to_string(),
            status,
            success: None,
            retry: None,
        }
    }

    fn print(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => print_json(self)?,
            OutputFormat::Text => {
                let mut line = format!("{} ({}): {}", self.name, self.id, self.status);
                if let Some(success) = self.success {
                    line.push_str(if success { ", success" } else { ", failure" });
                }
                if let Some(retry) = self.retry {
                    line.push_str(if retry { ", retry" } else { ", no retry" });
                }
                println!("{line}");
            }
        }
        Ok(())
    }
}

fn dispatch_status(dispatch: &Dispatch) -> &'static str {
    match dispatch {
        Dispatch::NotExecuted => "not executed",
        Dispatch::Delegated => "delegated to legacy scheduler",
        Dispatch::Failed => "no worker",
        Dispatch::Execute(_) => "started",
    }
}

/// Dispatch, run the worker to completion and record the outcome.
pub async fn run(app: &App, key: &str, format: OutputFormat) -> Result<()> {
    let id = app.job(key)?.id;
    let worker = match app.service.start_job(id) {
        Dispatch::Execute(worker) => worker,
        other => return LifecycleReport::new(app, id, dispatch_status(&other)).print(format),
    };

    let outcome = worker.execute().await;
    app.service.job_finished(id, outcome.success, outcome.should_retry);

    let mut report = LifecycleReport::new(app, id, "finished");
    report.success = Some(outcome.success);
    report.retry = Some(outcome.should_retry);
    report.print(format)
}

/// Dispatch and record the start; the caller runs the job and reports back.
pub fn start(app: &App, key: &str, format: OutputFormat) -> Result<()> {
    let id = app.job(key)?.id;
    let dispatch = app.service.start_job(id);
    LifecycleReport::new(app, id, dispatch_status(&dispatch)).print(format)
}

pub fn finish(app: &App, args: FinishArgs, format: OutputFormat) -> Result<()> {
    let id = app.job(&args.job)?.id;
    app.service.job_finished(id, args.success, args.retry);

    let mut report = LifecycleReport::new(app, id, "finished");
    report.success = Some(args.success);
    report.retry = Some(args.retry);
    report.print(format)
}

pub fn stop(app: &App, args: StopArgs, format: OutputFormat) -> Result<()> {
    let id = app.job(&args.job)?.id;
    let retry = app.service.on_stop_job(id, args.reason);

    let mut report = LifecycleReport::new(app, id, "stopped");
    report.retry = Some(retry);
    report.print(format)
}

pub fn skip(app: &App, args: SkipArgs, format: OutputFormat) -> Result<()> {
    let id = app.job(&args.job)?.id;
    app.service.skip_job(id, args.reason.into());
    LifecycleReport::new(app, id, "skipped").print(format)
}
