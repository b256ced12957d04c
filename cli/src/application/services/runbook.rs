//! Application service: run one plan against one host.
//!
//! Steps run strictly in order. The first failing step stops the host and is
//! recorded in the outcome; nothing already done is undone.

use std::process::Output;
use std::time::Duration;

use agentship_common::{HostReport, HostStatus};
use anyhow::{Context, Result};

use crate::application::ports::{ProgressReporter, RemoteSession};
use crate::domain::plan::{home_chown, home_create, home_probe};
use crate::domain::{Host, Plan, RemoteCommand, Step, StepError};

/// Timeout for short remote commands (`chmod`, `rm`, `mkdir`, ...).
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for uploads and the installer, which may move or unpack large archives.
pub const LONG_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// What happened on one host.
#[derive(Debug)]
pub struct HostOutcome {
    pub host: Host,
    /// Steps that finished successfully, counted from the start of the plan.
    pub completed: usize,
    pub total: usize,
    /// Non-empty stdout lines of `Announce` and `RunInstaller` steps.
    pub output: Vec<String>,
    pub error: Option<anyhow::Error>,
}

impl HostOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    #[must_use]
    pub fn to_report(&self) -> HostReport {
        HostReport {
            host: self.host.to_string(),
            status: if self.succeeded() {
                HostStatus::Succeeded
            } else {
                HostStatus::Failed
            },
            steps_completed: self.completed,
            steps_total: self.total,
            output: self.output.clone(),
            error: self.error.as_ref().map(|e| format!("{e:#}")),
        }
    }
}

/// Run every step of `plan` on `host`, stopping at the first failure.
pub async fn run_plan(
    session: &impl RemoteSession,
    host: &Host,
    plan: &Plan,
    reporter: &impl ProgressReporter,
) -> HostOutcome {
    let mut outcome = HostOutcome {
        host: host.clone(),
        completed: 0,
        total: plan.len(),
        output: Vec::new(),
        error: None,
    };

    for (index, step) in plan.steps().iter().enumerate() {
        reporter.step(&format!("{host}: {}", step.describe()));
        match run_step(session, host, step).await {
            Ok(lines) => {
                outcome.output.extend(lines);
                outcome.completed += 1;
            }
            Err(e) => {
                let e = e.context(format!(
                    "step {}/{} ({}) failed on {host}",
                    index + 1,
                    plan.len(),
                    step.describe()
                ));
                tracing::warn!(host = %host, error = %format!("{e:#}"), "host failed");
                outcome.error = Some(e);
                return outcome;
            }
        }
    }

    tracing::info!(host = %host, steps = outcome.completed, "host succeeded");
    reporter.success(&format!("{host}: done"));
    outcome
}

/// Execute one step and return the stdout lines worth keeping.
async fn run_step(session: &impl RemoteSession, host: &Host, step: &Step) -> Result<Vec<String>> {
    match step {
        Step::EnsureHome { dir } => {
            let probe = session
                .exec(host, &home_probe(dir), COMMAND_TIMEOUT)
                .await
                .context("checking home directory")?;
            if !probe.status.success() {
                tracing::debug!(host = %host, dir = %dir, "home directory missing, creating");
                exec_checked(session, host, &home_create(dir), COMMAND_TIMEOUT).await?;
                exec_checked(session, host, &home_chown(dir, &host.user), COMMAND_TIMEOUT).await?;
            }
            Ok(Vec::new())
        }
        Step::Upload { artifact, .. } => {
            let Some(remote) = step.upload_target() else {
                return Ok(Vec::new());
            };
            let output = session
                .upload(host, &artifact.local, &remote, LONG_TIMEOUT)
                .await
                .with_context(|| format!("uploading {}", artifact.local.display()))?;
            if !output.status.success() {
                return Err(StepError::UploadFailed {
                    file: artifact.local.display().to_string(),
                    remote,
                    code: exit_code(&output),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
                .into());
            }
            Ok(Vec::new())
        }
        Step::RunInstaller { .. } | Step::Announce { .. } => {
            let timeout = if matches!(step, Step::RunInstaller { .. }) {
                LONG_TIMEOUT
            } else {
                COMMAND_TIMEOUT
            };
            let Some(command) = step.command() else {
                return Ok(Vec::new());
            };
            let output = exec_checked(session, host, &command, timeout).await?;
            Ok(stdout_lines(&output))
        }
        Step::MakeExecutable { .. } | Step::Extract { .. } | Step::Remove { .. } => {
            if let Some(command) = step.command() {
                exec_checked(session, host, &command, COMMAND_TIMEOUT).await?;
            }
            Ok(Vec::new())
        }
    }
}

/// Run a remote command and turn a non-zero exit into `StepError::CommandFailed`.
async fn exec_checked(
    session: &impl RemoteSession,
    host: &Host,
    command: &RemoteCommand,
    timeout: Duration,
) -> Result<Output> {
    let output = session
        .exec(host, command, timeout)
        .await
        .with_context(|| format!("running `{command}`"))?;
    if !output.status.success() {
        return Err(StepError::CommandFailed {
            command: command.to_string(),
            code: exit_code(&output),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into());
    }
    Ok(output)
}

/// Exit code of a finished process; `-1` when it was killed by a signal.
fn exit_code(output: &Output) -> i32 {
    output.status.code().unwrap_or(-1)
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
        .collect()
}
