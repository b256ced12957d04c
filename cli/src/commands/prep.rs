//! `agentship prep`: stage the archive and install scripts on every host.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{ConfigSource, LocalFs};
use crate::application::services::preflight::{PREP_USAGE, check_file};
use crate::commands::execute_plan;
use crate::domain::plan::prep_plan;
use crate::domain::{DeployConfig, Plan};
use crate::infra::ssh::OpenSsh;

/// Arguments for the prep command.
#[derive(Args, Debug, Clone)]
pub struct PrepArgs {
    /// Local agent archive (zip)
    pub archive: Option<String>,
    /// Local zip bundle containing `local-agent-install.sh`
    pub scripts: Option<String>,
}

/// Validate both local files and build the per-host plan.
///
/// # Errors
///
/// Returns a `ValidationError` if either file is missing or unusable.
pub fn build_plan(args: &PrepArgs, fs: &impl LocalFs, config: &DeployConfig) -> Result<Plan> {
    let archive = check_file(
        fs,
        args.archive.as_deref().unwrap_or(""),
        "An agent archive",
        PREP_USAGE,
    )?;
    let scripts = check_file(
        fs,
        args.scripts.as_deref().unwrap_or(""),
        "A scripts bundle",
        PREP_USAGE,
    )?;
    Ok(prep_plan(&archive, &scripts, &config.home))
}

/// Run the prep command.
///
/// # Errors
///
/// Returns an error if the config or a local file is invalid.
pub async fn run(
    app: &AppContext,
    args: &PrepArgs,
    source: &impl ConfigSource,
    fs: &impl LocalFs,
) -> Result<ExitCode> {
    let (config, _) = app.load_config(source)?;
    let plan = build_plan(args, fs, &config)?;
    let session = OpenSsh::from_config(&config);
    execute_plan(app, &config, "prep", &plan, &session).await
}
