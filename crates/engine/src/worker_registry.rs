// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job id to worker factory lookup.

use crate::EngineError;
use bgjob_adapters::Worker;
use bgjob_core::JobId;
use std::collections::HashMap;
use std::sync::Arc;

type WorkerFactory = Arc<dyn Fn() -> Box<dyn Worker> + Send + Sync>;

#[derive(Clone)]
struct WorkerEntry {
    factory: WorkerFactory,
    retry_on_stop: bool,
}

/// Factories producing a fresh worker for each execution.
///
/// Adding a job means registering an entry here; nothing else switches on
/// job ids.
#[derive(Clone, Default)]
pub struct WorkerRegistry {
    entries: HashMap<JobId, WorkerEntry>,
}

impl std::fmt::Debug for WorkerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerRegistry")
            .field("jobs", &self.entries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl WorkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a worker that asks to be retried when the OS stops it.
    pub fn register<W, F>(&mut self, job_id: JobId, factory: F) -> Result<(), EngineError>
    where
        W: Worker + 'static,
        F: Fn() -> W + Send + Sync + 'static,
    {
        self.register_with_stop_policy(job_id, true, factory)
    }

    pub fn register_with_stop_policy<W, F>(
        &mut self,
        job_id: JobId,
        retry_on_stop: bool,
        factory: F,
    ) -> Result<(), EngineError>
    where
        W: Worker + 'static,
        F: Fn() -> W + Send + Sync + 'static,
    {
        if self.entries.contains_key(&job_id) {
            return Err(EngineError::DuplicateWorker(job_id));
        }
        let factory: WorkerFactory = Arc::new(move || Box::new(factory()) as Box<dyn Worker>);
        self.entries.insert(
            job_id,
            WorkerEntry {
                factory,
                retry_on_stop,
            },
        );
        Ok(())
    }

    pub fn resolve(&self, job_id: JobId) -> Option<Box<dyn Worker>> {
        self.entries.get(&job_id).map(|entry| (entry.factory)())
    }

    /// Stop policy for a job; unregistered jobs retry.
    pub fn retry_on_stop(&self, job_id: JobId) -> bool {
        self.entries
            .get(&job_id)
            .map_or(true, |entry| entry.retry_on_stop)
    }
}

#[cfg(test)]
#[path = "worker_registry_tests.rs"]
mod tests;
