// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Resolve state directory:
/// BGJOB_STATE_DIR > XDG_STATE_HOME/bgjob > platform state dir > ~/.local/state/bgjob
pub fn state_dir() -> Result<PathBuf> {
    if let Some(dir) = non_empty("BGJOB_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("bgjob"));
    }
    if let Some(dir) = dirs::state_dir() {
        return Ok(dir.join("bgjob"));
    }
    let home = non_empty("HOME").ok_or_else(|| anyhow!("cannot resolve state directory: HOME not set"))?;
    Ok(PathBuf::from(home).join(".local/state/bgjob"))
}

/// Log filter directive: BGJOB_LOG > RUST_LOG
pub fn log_filter() -> Option<String> {
    non_empty("BGJOB_LOG").or_else(|| non_empty("RUST_LOG"))
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
