// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable key-value store with atomic multi-key commits.
//!
//! The whole map is rewritten on every commit: serialize, write to `.tmp`,
//! fsync, rename over the store file, fsync the directory. A crash at any
//! point leaves either the old or the new file, never a torn one.
//!
//! ```text
//! begin() ── lock map ──→ get/put (staged) ──→ commit()
//!                                                │
//!                          write .tmp, fsync, rename, fsync dir
//!                                                │
//!                          swap staged into map ─┘ (unlock on drop)
//! ```
//!
//! All file operations go through [`StoreWriter`] so tests can inject
//! commit failures.

use chrono::{DateTime, Utc};
use fs2::FileExt;
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// On-disk format version written by this build.
pub const CURRENT_STORE_VERSION: u32 = 1;

const MAX_BAK_FILES: u32 = 3;

/// Errors that can occur in store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store {0} is locked by another process")]
    Locked(PathBuf),
    #[error("store version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Trait abstracting store file I/O.
pub trait StoreWriter: Send + Sync + 'static {
    /// Write serialized store data to a temporary file.
    fn write_tmp(&self, path: &Path, data: &[u8]) -> Result<(), StoreError>;

    /// Fsync a file to ensure data is durable.
    fn fsync_file(&self, path: &Path) -> Result<(), StoreError>;

    /// Atomically rename tmp file to final path.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), StoreError>;

    /// Fsync directory to make rename durable.
    fn fsync_dir(&self, path: &Path) -> Result<(), StoreError>;
}

/// Production writer using real filesystem operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsStoreWriter;

impl StoreWriter for FsStoreWriter {
    fn write_tmp(&self, path: &Path, data: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        file.write_all(data)?;
        Ok(())
    }

    fn fsync_file(&self, path: &Path) -> Result<(), StoreError> {
        File::open(path)?.sync_all()?;
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), StoreError> {
        fs::rename(from, to)?;
        Ok(())
    }

    fn fsync_dir(&self, path: &Path) -> Result<(), StoreError> {
        File::open(path)?.sync_all()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct StoreFileRef<'a> {
    version: u32,
    updated_at: DateTime<Utc>,
    entries: &'a BTreeMap<String, i64>,
}

#[derive(Deserialize)]
struct StoreFile {
    version: u32,
    entries: BTreeMap<String, i64>,
}

struct Backing {
    path: PathBuf,
    writer: Box<dyn StoreWriter>,
    // NOTE(lifetime): Held to keep the exclusive advisory lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
}

/// Crash-safe map from string keys to `i64` values.
///
/// A single internal mutex gives single-writer semantics: a [`Transaction`]
/// holds it from `begin()` until it is committed or dropped. Plain reads
/// take it briefly and may interleave between transactions.
pub struct KvStore {
    entries: Mutex<BTreeMap<String, i64>>,
    backing: Option<Backing>,
}

impl KvStore {
    /// Open (or create) a file-backed store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::open_with_writer(path, FsStoreWriter)
    }

    /// Open a file-backed store with a custom writer (for testing).
    pub fn open_with_writer(path: &Path, writer: impl StoreWriter) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_path = path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        if lock_file.try_lock_exclusive().is_err() {
            return Err(StoreError::Locked(path.to_owned()));
        }

        let entries = load_entries(path)?;

        Ok(Self {
            entries: Mutex::new(entries),
            backing: Some(Backing {
                path: path.to_owned(),
                writer: Box::new(writer),
                lock_file,
            }),
        })
    }

    /// Store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            backing: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.backing.as_ref().map(|b| b.path.as_path())
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries.lock().get(key).copied()
    }

    /// Copy of every committed entry.
    pub fn snapshot(&self) -> BTreeMap<String, i64> {
        self.entries.lock().clone()
    }

    /// Start a read-modify-write cycle. Blocks other writers until the
    /// returned transaction is committed or dropped.
    pub fn begin(&self) -> Transaction<'_> {
        Transaction {
            backing: self.backing.as_ref(),
            entries: self.entries.lock(),
            staged: BTreeMap::new(),
        }
    }
}

/// Staged writes over a locked store.
///
/// Dropping without [`commit`](Transaction::commit) discards the writes.
pub struct Transaction<'a> {
    backing: Option<&'a Backing>,
    entries: MutexGuard<'a, BTreeMap<String, i64>>,
    staged: BTreeMap<String, i64>,
}

impl Transaction<'_> {
    /// Read a value, seeing this transaction's own staged writes.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.staged
            .get(key)
            .or_else(|| self.entries.get(key))
            .copied()
    }

    pub fn put(&mut self, key: impl Into<String>, value: i64) {
        self.staged.insert(key.into(), value);
    }

    /// Persist all staged writes at once.
    ///
    /// On error the in-memory map keeps its previous contents, matching
    /// what is on disk.
    pub fn commit(mut self) -> Result<(), StoreError> {
        if self.staged.is_empty() {
            return Ok(());
        }

        let mut next = (*self.entries).clone();
        next.extend(std::mem::take(&mut self.staged));

        if let Some(backing) = self.backing {
            persist(backing, &next)?;
        }

        *self.entries = next;
        Ok(())
    }
}

fn persist(backing: &Backing, entries: &BTreeMap<String, i64>) -> Result<(), StoreError> {
    let path = &backing.path;
    let tmp_path = path.with_extension("tmp");

    let data = serde_json::to_vec(&StoreFileRef {
        version: CURRENT_STORE_VERSION,
        updated_at: Utc::now(),
        entries,
    })?;

    backing.writer.write_tmp(&tmp_path, &data)?;
    backing.writer.fsync_file(&tmp_path)?;
    backing.writer.rename(&tmp_path, path)?;
    if let Some(parent) = path.parent() {
        backing.writer.fsync_dir(parent)?;
    }
    Ok(())
}

/// Load entries from disk.
///
/// A missing file is an empty store. A corrupt file is moved to a `.bak`
/// so the store starts fresh instead of refusing to open.
fn load_entries(path: &Path) -> Result<BTreeMap<String, i64>, StoreError> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_slice::<StoreFile>(&data) {
        Ok(file) if file.version > CURRENT_STORE_VERSION => Err(StoreError::UnsupportedVersion {
            found: file.version,
            supported: CURRENT_STORE_VERSION,
        }),
        Ok(file) => Ok(file.entries),
        Err(e) => {
            let bak_path = rotate_bak_path(path);
            warn!(
                error = %e,
                path = %path.display(),
                bak = %bak_path.display(),
                "Corrupt store, moving to .bak and starting fresh",
            );
            fs::rename(path, &bak_path)?;
            Ok(BTreeMap::new())
        }
    }
}

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
///
/// Keeps up to [`MAX_BAK_FILES`] backups: `.bak`, `.bak.2`, `.bak.3`.
fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

#[cfg(test)]
#[path = "kv_tests.rs"]
mod tests;
