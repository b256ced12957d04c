//! `agentship install`: run the staged installer on every host.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{ConfigSource, LocalFs, ProgressReporter};
use crate::application::services::preflight::{INSTALL_USAGE, existing_file};
use crate::commands::execute_plan;
use crate::domain::plan::install_plan;
use crate::domain::validate::artifact_name;
use crate::domain::{DeployConfig, Plan, ValidationError};
use crate::infra::ssh::OpenSsh;
use crate::output::TerminalReporter;

/// Arguments for the install command.
#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
    /// Agent archive already staged by `prep` (only its file name is used)
    pub archive: Option<String>,
    /// Local agent config file; skipped with a warning if it does not exist
    #[arg(value_name = "CONFIG")]
    pub agent_config: Option<String>,
}

/// Build the per-host plan.
///
/// A missing config file is not an error: the installer then runs without
/// `-c` and a warning is reported.
///
/// # Errors
///
/// Returns a `ValidationError` if the archive argument is empty or has no
/// file name.
pub fn build_plan(
    args: &InstallArgs,
    fs: &impl LocalFs,
    config: &DeployConfig,
    reporter: &impl ProgressReporter,
) -> Result<Plan> {
    let archive = args.archive.as_deref().unwrap_or("");
    if archive.trim().is_empty() {
        return Err(ValidationError::MissingArgument {
            what: "An agent archive",
            usage: INSTALL_USAGE,
        }
        .into());
    }
    let archive_name = artifact_name(archive).ok_or_else(|| ValidationError::NotAFile {
        path: archive.to_string(),
        usage: INSTALL_USAGE,
    })?;

    let agent_config = match args.agent_config.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => {
            let found = existing_file(fs, path);
            if found.is_none() {
                reporter.warn(&format!(
                    "Agent config file '{path}' not found; installing without -c"
                ));
            }
            found
        }
        _ => {
            reporter.warn("No agent config file given; installing without -c");
            None
        }
    };

    Ok(install_plan(archive_name, agent_config.as_ref(), &config.home))
}

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the config or the archive argument is invalid.
pub async fn run(
    app: &AppContext,
    args: &InstallArgs,
    source: &impl ConfigSource,
    fs: &impl LocalFs,
) -> Result<ExitCode> {
    let (config, _) = app.load_config(source)?;
    let plan = build_plan(
        args,
        fs,
        &config,
        &TerminalReporter::new(&app.output, app.is_json()),
    )?;
    let session = OpenSsh::from_config(&config);
    execute_plan(app, &config, "install", &plan, &session).await
}
