// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed scheduler registration table.

use super::{JobScheduler, SchedulerError};
use bgjob_core::{JobDescriptor, JobId};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Scheduler keeping its registrations in a JSON file (`{"<id>":"<name>"}`).
///
/// The file is re-read on every call so separate processes see each
/// other's registrations, and rewritten atomically (tmp + rename).
#[derive(Clone)]
pub struct FileJobScheduler {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl FileJobScheduler {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Arc::new(path),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every registered job, by id.
    pub fn scheduled(&self) -> Result<BTreeMap<JobId, String>, SchedulerError> {
        let _guard = self.lock.lock();
        self.load()
    }

    fn load(&self) -> Result<BTreeMap<JobId, String>, SchedulerError> {
        match fs::read(self.path.as_path()) {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, jobs: &BTreeMap<JobId, String>) -> Result<(), SchedulerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, jobs)?;
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, self.path.as_path())?;
        Ok(())
    }
}

impl JobScheduler for FileJobScheduler {
    fn schedule(&self, job: &JobDescriptor) -> Result<(), SchedulerError> {
        let _guard = self.lock.lock();
        let mut jobs = self.load()?;
        jobs.insert(job.id, job.name.clone());
        self.save(&jobs)
    }

    fn cancel(&self, job_id: JobId) -> Result<(), SchedulerError> {
        let _guard = self.lock.lock();
        let mut jobs = self.load()?;
        if jobs.remove(&job_id).is_some() {
            self.save(&jobs)?;
        }
        Ok(())
    }

    fn is_scheduled(&self, job_id: JobId) -> bool {
        let _guard = self.lock.lock();
        match self.load() {
            Ok(jobs) => jobs.contains_key(&job_id),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to read scheduler registrations"
                );
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
