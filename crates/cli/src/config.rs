// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bgjob.toml`: worker definitions.
//!
//! The same file carries the flags read by `TomlFlagSource`; this module
//! only reads the `[workers.<JOB_NAME>]` tables.
//!
//! ```toml
//! spe_pilot_jobs_enabled = true
//!
//! [workers.MAINTENANCE_JOB]
//! command = "./maintenance.sh"
//! timeout_secs = 30
//! retry_on_failure = false
//! retry_on_stop = true
//! ```

use anyhow::{Context, Result};
use bgjob_adapters::CommandWorker;
use bgjob_core::JobRegistry;
use bgjob_engine::WorkerRegistry;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "bgjob.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workers: BTreeMap<String, WorkerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    pub command: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub retry_on_failure: bool,
    #[serde(default = "default_true")]
    pub retry_on_stop: bool,
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load from `path`; a missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Build command workers for every configured job.
    pub fn workers(&self, registry: &JobRegistry) -> Result<WorkerRegistry> {
        let mut workers = WorkerRegistry::new();
        for (name, def) in &self.workers {
            let job = registry
                .find_by_name(name)
                .with_context(|| format!("worker defined for unknown job {name}"))?;

            let mut worker = CommandWorker::new(def.command.clone())
                .retry_on_failure(def.retry_on_failure);
            if let Some(secs) = def.timeout_secs {
                worker = worker.timeout(Duration::from_secs(secs));
            }
            if let Some(cwd) = &def.cwd {
                worker = worker.cwd(cwd.clone());
            }

            workers.register_with_stop_policy(job.id, def.retry_on_stop, move || worker.clone())?;
        }
        Ok(workers)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
