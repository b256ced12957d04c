//! OpenSSH transport: implements `RemoteShell` and `FileTransfer` by
//! spawning the system `ssh` client (through `sshpass` for password auth).

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, FileTransfer, RemoteShell};
use crate::domain::host::DEFAULT_SSH_PORT;
use crate::domain::{Credentials, DeployConfig, Host, RemoteCommand, SudoMode};
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};

/// Seconds between keepalive probes on an idle connection.
const SERVER_ALIVE_INTERVAL: u32 = 15;
/// Unanswered keepalives before ssh gives up.
const SERVER_ALIVE_COUNT_MAX: u32 = 3;

/// Environment variable `sshpass -e` reads the password from.
pub const SSHPASS_ENV: &str = "SSHPASS";

/// Runs remote commands and uploads through the `ssh` binary.
pub struct OpenSsh<R> {
    runner: R,
    credentials: Credentials,
    connect_timeout: Duration,
}

impl OpenSsh<TokioCommandRunner> {
    /// Production transport for `config`.
    ///
    /// With password auth the password is handed to the runner as
    /// `SSHPASS` so it never appears in a process argument list.
    #[must_use]
    pub fn from_config(config: &DeployConfig) -> Self {
        let mut runner = TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT);
        if let Some(password) = config.credentials.password() {
            runner = runner.with_env(SSHPASS_ENV, password);
        }
        Self::with_runner(runner, config)
    }
}

impl<R: CommandRunner> OpenSsh<R> {
    #[must_use]
    pub fn with_runner(runner: R, config: &DeployConfig) -> Self {
        Self {
            runner,
            credentials: config.credentials.clone(),
            connect_timeout: config.connect_timeout,
        }
    }

    /// The local program to spawn: `sshpass` for password auth, else `ssh`.
    #[must_use]
    pub fn program(&self) -> &'static str {
        match self.credentials {
            Credentials::Password(_) => "sshpass",
            _ => "ssh",
        }
    }

    fn sudo_mode(&self) -> SudoMode {
        match self.credentials {
            Credentials::Password(_) => SudoMode::Stdin,
            _ => SudoMode::NonInteractive,
        }
    }

    /// Full argument list for running `remote` on `host`.
    #[must_use]
    pub fn args(&self, host: &Host, remote: &str) -> Vec<String> {
        let mut args = Vec::new();
        if matches!(self.credentials, Credentials::Password(_)) {
            args.extend(["-e".to_string(), "ssh".to_string()]);
        } else {
            args.extend(["-o".to_string(), "BatchMode=yes".to_string()]);
        }
        for opt in [
            format!("ConnectTimeout={}", self.connect_timeout.as_secs()),
            format!("ServerAliveInterval={SERVER_ALIVE_INTERVAL}"),
            format!("ServerAliveCountMax={SERVER_ALIVE_COUNT_MAX}"),
            "StrictHostKeyChecking=accept-new".to_string(),
        ] {
            args.push("-o".to_string());
            args.push(opt);
        }
        if let Credentials::KeyFiles(keys) = &self.credentials {
            for key in keys {
                args.push("-i".to_string());
                args.push(key.display().to_string());
            }
        }
        if host.port != DEFAULT_SSH_PORT {
            args.push("-p".to_string());
            args.push(host.port.to_string());
        }
        args.push(host.destination());
        args.push(remote.to_string());
        args
    }
}

impl<R: CommandRunner> RemoteShell for OpenSsh<R> {
    async fn exec(
        &self,
        host: &Host,
        command: &RemoteCommand,
        timeout: Duration,
    ) -> Result<Output> {
        let mode = self.sudo_mode();
        let rendered = command.render(mode);
        tracing::debug!(host = %host, command = %rendered, "remote exec");
        let args = self.args(host, &rendered);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        match (command.needs_sudo(), self.credentials.password()) {
            (true, Some(password)) => {
                let input = format!("{password}\n");
                self.runner
                    .run_with_stdin(self.program(), &args, input.as_bytes(), timeout)
                    .await
            }
            _ => {
                self.runner
                    .run_with_timeout(self.program(), &args, timeout)
                    .await
            }
        }
    }
}

impl<R: CommandRunner> FileTransfer for OpenSsh<R> {
    async fn upload(
        &self,
        host: &Host,
        local: &Path,
        remote: &str,
        timeout: Duration,
    ) -> Result<Output> {
        let rendered = RemoteCommand::new("cat").stdout_to(remote).render(self.sudo_mode());
        tracing::debug!(host = %host, local = %local.display(), remote, "upload");
        let args = self.args(host, &rendered);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run_with_stdin_file(self.program(), &args, local, timeout)
            .await
    }
}
