//! Shared mock ports for unit tests.
//!
//! `RecordingSession` stands in for the SSH transport: it records every remote
//! call in order and fails the ones a test scripts to fail.

#![allow(dead_code, clippy::expect_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Mutex;
use std::time::Duration;

use agentship_cli::application::ports::{
    ConfigSource, FileTransfer, LocalFs, ProgressReporter, RemoteShell,
};
use agentship_cli::domain::{DeployConfig, Host, LocalFileState, RemoteCommand};
use anyhow::Result;

use crate::helpers::{err_output, ok_output};

// ── Remote session ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exec { host: String, command: String },
    Upload { host: String, local: PathBuf, remote: String },
}

struct Failure {
    host: String,
    needle: String,
    code: i32,
}

pub struct RecordingSession {
    calls: Mutex<Vec<Call>>,
    failures: Vec<Failure>,
    home_exists: bool,
    transport_down: Vec<String>,
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSession {
    /// Every call succeeds and the remote home already exists.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Vec::new(),
            home_exists: true,
            transport_down: Vec::new(),
        }
    }

    /// `sudo test -d <home>` fails, so the home has to be created.
    pub fn with_missing_home(mut self) -> Self {
        self.home_exists = false;
        self
    }

    /// Calls on `host` whose command (or upload target) contains `needle`
    /// exit with `code`.
    pub fn fail_when(mut self, host: &str, needle: &str, code: i32) -> Self {
        self.failures.push(Failure {
            host: host.to_string(),
            needle: needle.to_string(),
            code,
        });
        self
    }

    /// Every call to `host` errors before reaching it.
    pub fn unreachable(mut self, host: &str) -> Self {
        self.transport_down.push(host.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn calls_for(&self, host: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| match c {
                Call::Exec { host: h, .. } | Call::Upload { host: h, .. } => h == host,
            })
            .collect()
    }

    fn failure(&self, host: &Host, text: &str) -> Option<i32> {
        self.failures
            .iter()
            .find(|f| f.host == host.name && text.contains(&f.needle))
            .map(|f| f.code)
    }
}

impl RemoteShell for RecordingSession {
    async fn exec(&self, host: &Host, command: &RemoteCommand, _: Duration) -> Result<Output> {
        if self.transport_down.contains(&host.name) {
            anyhow::bail!("ssh: connect to host {} port 22: Connection refused", host.name);
        }
        let rendered = command.to_string();
        self.calls.lock().expect("lock").push(Call::Exec {
            host: host.name.clone(),
            command: rendered.clone(),
        });
        if let Some(code) = self.failure(host, &rendered) {
            return Ok(err_output(code, b"remote failure"));
        }
        if command.program() == "test" && !self.home_exists {
            return Ok(err_output(1, b""));
        }
        if command.program() == "echo" {
            let line = format!("{}\n", command.arguments().join(" "));
            return Ok(ok_output(line.as_bytes()));
        }
        Ok(ok_output(b""))
    }
}

impl FileTransfer for RecordingSession {
    async fn upload(
        &self,
        host: &Host,
        local: &Path,
        remote: &str,
        _: Duration,
    ) -> Result<Output> {
        if self.transport_down.contains(&host.name) {
            anyhow::bail!("ssh: connect to host {} port 22: Connection refused", host.name);
        }
        self.calls.lock().expect("lock").push(Call::Upload {
            host: host.name.clone(),
            local: local.to_path_buf(),
            remote: remote.to_string(),
        });
        if let Some(code) = self.failure(host, remote) {
            return Ok(err_output(code, b"No space left on device"));
        }
        Ok(ok_output(b""))
    }
}

// ── Local filesystem ─────────────────────────────────────────────────────────

/// In-memory `LocalFs`: every path not registered is missing.
#[derive(Default)]
pub struct MockFs {
    entries: HashMap<PathBuf, LocalFileState>,
}

impl MockFs {
    pub fn with_files(files: &[&str]) -> Self {
        let mut fs = Self::default();
        for f in files {
            fs.entries.insert(PathBuf::from(f), LocalFileState::RegularFile);
        }
        fs
    }

    pub fn with_dir(mut self, dir: &str) -> Self {
        self.entries.insert(PathBuf::from(dir), LocalFileState::Other);
        self
    }
}

impl LocalFs for MockFs {
    fn file_state(&self, path: &Path) -> LocalFileState {
        self.entries
            .get(path)
            .copied()
            .unwrap_or(LocalFileState::Missing)
    }
}

// ── Config source ────────────────────────────────────────────────────────────

/// Parses a fixed JSON document regardless of the path it is asked for.
pub struct StaticConfig(pub &'static str);

impl ConfigSource for StaticConfig {
    fn load(&self, path: &Path) -> Result<DeployConfig> {
        Ok(DeployConfig::from_json(self.0, &path.display().to_string())?)
    }
}

pub fn config(json: &str) -> DeployConfig {
    DeployConfig::from_json(json, "test.json").expect("valid test config")
}

// ── Progress reporter ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingReporter {
    pub steps: Mutex<Vec<String>>,
    pub successes: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.steps.lock().expect("lock").push(message.to_string());
    }

    fn success(&self, message: &str) {
        self.successes.lock().expect("lock").push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().expect("lock").push(message.to_string());
    }
}
