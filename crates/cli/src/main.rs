// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! bgjob - background job scheduling policy CLI

mod app;
mod commands;
mod config;
mod env;
mod output;
mod table;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{jobs, ledger, lifecycle, schedule};
use output::OutputFormat;
use std::path::Path;

use crate::app::{App, StatePaths};

#[derive(Parser)]
#[command(
    name = "bgjob",
    version,
    about = "bgjob - background job scheduling policy and execution ledger"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered jobs with their scheduling path
    Jobs,
    /// Show recorded execution timing
    Ledger {
        /// Job name or id (default: every recorded job)
        job: Option<String>,
    },
    /// Dispatch a job and run its worker to completion
    Run {
        /// Job name or id
        job: String,
    },
    /// Dispatch a job and record its start without running it
    Start {
        /// Job name or id
        job: String,
    },
    /// Record the end of an execution started with `start`
    Finish(lifecycle::FinishArgs),
    /// Record an OS stop of a running job
    Stop(lifecycle::StopArgs),
    /// Record a skipped execution
    Skip(lifecycle::SkipArgs),
    /// Register jobs with the scheduler their batch flag selects
    Schedule(schedule::ScheduleArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(1);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output (common when
/// thiserror variants use `#[error("... {0}")]` with `#[from]`).
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let state_dir = env::state_dir()?;
    let paths = StatePaths::new(&state_dir);
    let _log_guard = setup_logging(&paths.log)?;
    tracing::debug!(state_dir = %state_dir.display(), "starting");

    let app = App::open(&paths)?;

    match cli.command {
        Commands::Jobs => jobs::handle(&app, format)?,
        Commands::Ledger { job } => ledger::handle(&app, job, format)?,
        Commands::Run { job } => lifecycle::run(&app, &job, format).await?,
        Commands::Start { job } => lifecycle::start(&app, &job, format)?,
        Commands::Finish(args) => lifecycle::finish(&app, args, format)?,
        Commands::Stop(args) => lifecycle::stop(&app, args, format)?,
        Commands::Skip(args) => lifecycle::skip(&app, args, format)?,
        Commands::Schedule(args) => schedule::handle(&app, args, format)?,
    }

    Ok(())
}

/// Route tracing output to `log_path`; the guard must outlive the command.
fn setup_logging(log_path: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let dir = log_path
        .parent()
        .context("log path has no parent directory")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating state directory {}", dir.display()))?;
    let file_name = log_path.file_name().context("log path has no file name")?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = env::log_filter()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(guard)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
