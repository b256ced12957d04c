//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{DeployConfig, Host, LocalFileState, RemoteCommand};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with stdin piped from `input`.
    async fn run_with_stdin(
        &self,
        program: &str,
        args: &[&str],
        input: &[u8],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with stdin streamed from the local file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be opened, the process cannot be
    /// spawned, or it exceeds `timeout`.
    async fn run_with_stdin_file(
        &self,
        program: &str,
        args: &[&str],
        path: &Path,
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Remote Ports ──────────────────────────────────────────────────────────────

/// Command execution on a remote host.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Run `command` on `host` and capture its output.
    ///
    /// A non-zero remote exit status is returned in `Output::status`, not as
    /// an error. Errors mean the local transport could not run at all.
    async fn exec(&self, host: &Host, command: &RemoteCommand, timeout: Duration)
    -> Result<Output>;
}

/// Local-to-remote file copy.
#[allow(async_fn_in_trait)]
pub trait FileTransfer {
    /// Copy the local file at `local` to the absolute remote path `remote`.
    async fn upload(
        &self,
        host: &Host,
        local: &Path,
        remote: &str,
        timeout: Duration,
    ) -> Result<Output>;
}

/// Composite trait: everything a plan needs from a host.
pub trait RemoteSession: RemoteShell + FileTransfer {}

/// Blanket implementation: any type implementing both sub-traits is a `RemoteSession`.
impl<T> RemoteSession for T where T: RemoteShell + FileTransfer {}

// ── Local Ports ───────────────────────────────────────────────────────────────

/// Abstracts local filesystem lookups so validation can be tested without disk.
pub trait LocalFs {
    /// Whether `path` is missing, a regular file, or something else.
    fn file_state(&self, path: &Path) -> LocalFileState;
}

/// Loads and validates the deployment config.
pub trait ConfigSource {
    /// Read the config at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    fn load(&self, path: &Path) -> Result<DeployConfig>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
