// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job registry: the fixed set of background jobs and their stable ids.
//!
//! Ids are persisted in ledger keys and reported in telemetry, so an
//! entry's id must never change once shipped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Stable numeric identifier of a background job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for JobId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Immutable metadata for one registered job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub name: String,
    pub id: JobId,
}

/// Errors building a registry from a job table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate job id {id}: {first} and {second}")]
    DuplicateId {
        id: JobId,
        first: String,
        second: String,
    },
    #[error("duplicate job name {name}: ids {first} and {second}")]
    DuplicateName {
        name: String,
        first: JobId,
        second: JobId,
    },
}

/// Jobs run by the service, as `(name, id)`.
pub const BUILTIN_JOBS: &[(&str, i32)] = &[
    ("MAINTENANCE_JOB", 1),
    ("TOPICS_EPOCH_JOB", 2),
    ("MEASUREMENT_EVENT_MAIN_REPORTING_JOB", 3),
    ("CONSENT_NOTIFICATION_JOB", 4),
    ("MEASUREMENT_DELETE_EXPIRED_JOB", 5),
    ("MEASUREMENT_DELETE_UNINSTALLED_JOB", 6),
    ("MEASUREMENT_ATTRIBUTION_JOB", 7),
    ("MEASUREMENT_EVENT_FALLBACK_REPORTING_JOB", 8),
    ("FLEDGE_BACKGROUND_FETCH_JOB", 9),
    ("MEASUREMENT_AGGREGATE_MAIN_REPORTING_JOB", 10),
    ("MDD_MAINTENANCE_PERIODIC_TASK_JOB", 11),
    ("MDD_CHARGING_PERIODIC_TASK_JOB", 12),
    ("MDD_CELLULAR_CHARGING_PERIODIC_TASK_JOB", 13),
    ("MDD_WIFI_CHARGING_PERIODIC_TASK_JOB", 14),
    ("MEASUREMENT_AGGREGATE_FALLBACK_REPORTING_JOB", 15),
    ("ENCRYPTION_KEY_PERIODIC_JOB", 16),
    ("PERIODIC_SIGNALS_ENCODING_JOB", 17),
    ("FLEDGE_KANON_SIGN_JOIN_JOB", 18),
];

/// Bidirectional lookup over a validated job table.
#[derive(Debug, Clone)]
pub struct JobRegistry {
    by_id: HashMap<JobId, JobDescriptor>,
    by_name: HashMap<String, JobId>,
}

impl JobRegistry {
    /// Build a registry, failing on any id or name collision.
    pub fn new<'a>(
        table: impl IntoIterator<Item = (&'a str, i32)>,
    ) -> Result<Self, RegistryError> {
        let mut by_id: HashMap<JobId, JobDescriptor> = HashMap::new();
        let mut by_name = HashMap::new();

        for (name, id) in table {
            let id = JobId(id);
            if let Some(existing) = by_id.get(&id) {
                return Err(RegistryError::DuplicateId {
                    id,
                    first: existing.name.clone(),
                    second: name.to_string(),
                });
            }
            if let Some(&first) = by_name.get(name) {
                return Err(RegistryError::DuplicateName {
                    name: name.to_string(),
                    first,
                    second: id,
                });
            }
            by_name.insert(name.to_string(), id);
            by_id.insert(
                id,
                JobDescriptor {
                    name: name.to_string(),
                    id,
                },
            );
        }

        Ok(Self { by_id, by_name })
    }

    /// Registry over [`BUILTIN_JOBS`].
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(BUILTIN_JOBS.iter().copied())
    }

    pub fn resolve(&self, id: JobId) -> Option<&JobDescriptor> {
        self.by_id.get(&id)
    }

    pub fn name(&self, id: JobId) -> Option<&str> {
        self.by_id.get(&id).map(|d| d.name.as_str())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&JobDescriptor> {
        self.by_name.get(name).and_then(|id| self.by_id.get(id))
    }

    /// Descriptors ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &JobDescriptor> {
        let mut jobs: Vec<_> = self.by_id.values().collect();
        jobs.sort_by_key(|d| d.id);
        jobs.into_iter()
    }
}

#[cfg(test)]
#[path = "job_info_tests.rs"]
mod tests;
