//! `agentship cleanup`: remove the staged archive and config from every host.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ConfigSource;
use crate::application::services::preflight::CLEANUP_USAGE;
use crate::commands::execute_plan;
use crate::domain::plan::cleanup_plan;
use crate::domain::validate::artifact_name;
use crate::domain::{DeployConfig, Plan, ValidationError};
use crate::infra::ssh::OpenSsh;

/// Arguments for the cleanup command.
#[derive(Args, Debug, Clone)]
pub struct CleanupArgs {
    /// Agent archive to remove (only its file name is used)
    pub archive: Option<String>,
    /// Agent config file to remove (only its file name is used)
    #[arg(value_name = "CONFIG")]
    pub agent_config: Option<String>,
}

/// Build the per-host plan from the base names of both arguments.
///
/// # Errors
///
/// Returns a `ValidationError` if the archive argument is empty or has no
/// file name.
pub fn build_plan(args: &CleanupArgs, config: &DeployConfig) -> Result<Plan> {
    let archive = args.archive.as_deref().unwrap_or("");
    if archive.trim().is_empty() {
        return Err(ValidationError::MissingArgument {
            what: "An agent archive",
            usage: CLEANUP_USAGE,
        }
        .into());
    }
    let archive_name = artifact_name(archive).ok_or_else(|| ValidationError::NotAFile {
        path: archive.to_string(),
        usage: CLEANUP_USAGE,
    })?;
    let config_name = args.agent_config.as_deref().and_then(artifact_name);
    Ok(cleanup_plan(archive_name, config_name, &config.home))
}

/// Run the cleanup command.
///
/// # Errors
///
/// Returns an error if the config or the archive argument is invalid.
pub async fn run(
    app: &AppContext,
    args: &CleanupArgs,
    source: &impl ConfigSource,
) -> Result<ExitCode> {
    let (config, _) = app.load_config(source)?;
    let plan = build_plan(args, &config)?;
    let session = OpenSsh::from_config(&config);
    execute_plan(app, &config, "cleanup", &plan, &session).await
}
