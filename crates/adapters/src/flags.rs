// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flag sources backed by configuration files.

use bgjob_core::{FlagSource, Flags};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors reading a flags file
#[derive(Debug, Error)]
pub enum FlagsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid flags file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Flags read from a TOML file on every call.
///
/// A missing file yields the defaults. An unreadable or invalid file is
/// logged and also yields the defaults; the scheduling layer never fails
/// on a bad flags file.
#[derive(Clone)]
pub struct TomlFlagSource {
    path: Arc<PathBuf>,
}

impl TomlFlagSource {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Arc::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, surfacing errors instead of falling back.
    pub fn load(&self) -> Result<Flags, FlagsError> {
        let content = match std::fs::read_to_string(self.path.as_path()) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Flags::default()),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&content).map_err(|source| FlagsError::Parse {
            path: self.path.as_ref().clone(),
            source,
        })
    }
}

impl FlagSource for TomlFlagSource {
    fn flags(&self) -> Flags {
        match self.load() {
            Ok(flags) => flags,
            Err(e) => {
                tracing::warn!(error = %e, "using default flags");
                Flags::default()
            }
        }
    }
}

/// Mutable flags for tests. Clones share state.
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Default)]
pub struct FakeFlagSource {
    inner: Arc<parking_lot::Mutex<Flags>>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeFlagSource {
    pub fn new(flags: Flags) -> Self {
        Self {
            inner: Arc::new(parking_lot::Mutex::new(flags)),
        }
    }

    /// Apply a change visible to every clone on its next read.
    pub fn update(&self, f: impl FnOnce(&mut Flags)) {
        f(&mut self.inner.lock());
    }
}

#[cfg(any(test, feature = "test-support"))]
impl FlagSource for FakeFlagSource {
    fn flags(&self) -> Flags {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
#[path = "flags_tests.rs"]
mod tests;
