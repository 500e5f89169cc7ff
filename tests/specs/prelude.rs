//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running bgjob against an isolated state dir.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Returns the path to a binary, checking the llvm-cov target directory
/// first, then the standard one, then the directory of the test binary.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    assert_cmd::cargo::cargo_bin(name)
}

/// Returns a Command configured to run the bgjob binary
pub fn bgjob_cmd() -> Command {
    Command::new(binary_path("bgjob"))
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new(state_dir: &Path) -> Self {
        Self {
            args: Vec::new(),
            envs: vec![(
                "BGJOB_STATE_DIR".into(),
                state_dir.to_string_lossy().into(),
            )],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = bgjob_cmd();
        cmd.args(&self.args);
        cmd.env_remove("BGJOB_LOG").env_remove("RUST_LOG");
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON (for `-o json` runs)
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).unwrap_or_else(|e| {
            panic!("stdout is not JSON: {e}\nstdout: {}", self.stdout())
        })
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain {:?}\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout unexpectedly contains {:?}\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain {:?}\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

/// Isolated state directory, removed on drop
pub struct Project {
    state: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            state: tempfile::tempdir().unwrap(),
        }
    }

    /// Project with `bgjob.toml` set to `content`
    pub fn with_config(content: &str) -> Self {
        let project = Self::empty();
        project.file("bgjob.toml", content);
        project
    }

    pub fn state_path(&self) -> &Path {
        self.state.path()
    }

    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full = self.state.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.state.path().join(path)).unwrap_or_default()
    }

    /// Telemetry lines written so far
    pub fn stats(&self) -> Vec<serde_json::Value> {
        self.read("stats.jsonl")
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    pub fn bgjob(&self) -> CliBuilder {
        CliBuilder::new(self.state.path())
    }
}

/// Config migrating both batches with a worker for `FLEDGE_BACKGROUND_FETCH_JOB`
pub const MIGRATED_CONFIG: &str = r#"
spe_pilot_jobs_enabled = true
spe_jobs_batch2_enabled = true

[workers.FLEDGE_BACKGROUND_FETCH_JOB]
command = "exit 0"

[workers.MAINTENANCE_JOB]
command = "exit 3"
retry_on_failure = true
retry_on_stop = false
"#;
