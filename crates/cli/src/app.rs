// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Composition root: wires file-backed adapters into a job service.

use crate::config::{Config, CONFIG_FILE};
use anyhow::{bail, Context, Result};
use bgjob_adapters::{
    FileJobScheduler, JsonlStatsSink, TomlFlagSource, TracedScheduler, TracedStatsSink,
};
use bgjob_core::{JobDescriptor, JobRegistry, SchedulerType, SystemClock};
use bgjob_engine::{JobService, JobServiceDeps, LogExecutor};
use bgjob_storage::ExecutionLedger;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub type Scheduler = TracedScheduler<FileJobScheduler>;
pub type Stats = TracedStatsSink<JsonlStatsSink>;
pub type Service = JobService<Scheduler, Stats, TomlFlagSource, SystemClock>;

/// Files under the state directory.
pub struct StatePaths {
    pub config: PathBuf,
    pub ledger: PathBuf,
    pub stats: PathBuf,
    pub legacy_scheduler: PathBuf,
    pub policy_scheduler: PathBuf,
    pub log: PathBuf,
}

impl StatePaths {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            config: state_dir.join(CONFIG_FILE),
            ledger: state_dir.join("ledger.json"),
            stats: state_dir.join("stats.jsonl"),
            legacy_scheduler: state_dir.join("schedulers/legacy.json"),
            policy_scheduler: state_dir.join("schedulers/policy.json"),
            log: state_dir.join("bgjob.log"),
        }
    }
}

pub struct App {
    pub registry: Arc<JobRegistry>,
    pub service: Service,
    pub flags: TomlFlagSource,
    pub legacy: FileJobScheduler,
    pub policy: FileJobScheduler,
}

impl App {
    pub fn open(paths: &StatePaths) -> Result<Self> {
        let registry = Arc::new(JobRegistry::builtin()?);
        let config = Config::load(&paths.config)?;
        let workers = Arc::new(config.workers(&registry)?);

        let ledger = ExecutionLedger::open(&paths.ledger)
            .with_context(|| format!("opening ledger {}", paths.ledger.display()))?;

        let flags = TomlFlagSource::new(paths.config.clone());
        let legacy = FileJobScheduler::new(paths.legacy_scheduler.clone());
        let policy = FileJobScheduler::new(paths.policy_scheduler.clone());

        let service = JobService::new(
            JobServiceDeps {
                legacy_scheduler: TracedScheduler::new(legacy.clone(), SchedulerType::Legacy),
                policy_scheduler: TracedScheduler::new(policy.clone(), SchedulerType::Policy),
                stats: TracedStatsSink::new(JsonlStatsSink::new(paths.stats.clone())),
                flags: flags.clone(),
                clock: SystemClock,
                ledger: Arc::new(ledger),
            },
            Arc::clone(&registry),
            workers,
            LogExecutor::Inline,
        );

        Ok(Self {
            registry,
            service,
            flags,
            legacy,
            policy,
        })
    }

    /// Look a job up by name or numeric id.
    pub fn job(&self, key: &str) -> Result<&JobDescriptor> {
        resolve_job(&self.registry, key)
    }
}

pub fn resolve_job<'a>(registry: &'a JobRegistry, key: &str) -> Result<&'a JobDescriptor> {
    if let Some(job) = registry.find_by_name(key) {
        return Ok(job);
    }
    if let Ok(id) = key.parse::<i32>() {
        if let Some(job) = registry.resolve(id.into()) {
            return Ok(job);
        }
    }
    bail!("unknown job: {key}")
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
