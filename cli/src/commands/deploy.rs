//! `agentship deploy`: upload, install, and clean up on every host.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{ConfigSource, LocalFs};
use crate::application::services::preflight::{self, DeployInputs};
use crate::commands::execute_plan;
use crate::domain::plan::{self, CONFIG_SCRIPT, INSTALL_SCRIPT};
use crate::domain::{DeployConfig, Plan};
use crate::infra::ssh::OpenSsh;

/// Arguments for the deploy command.
#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    /// Local agent archive (zip) to install
    #[arg(long, short = 'a')]
    pub archive: Option<String>,

    /// Remote agent home directory [default: `appd-home` from the config]
    #[arg(long)]
    pub home: Option<String>,

    /// Local agent config file, passed to the installer as `-c`
    #[arg(long, short = 'c')]
    pub agent_config: Option<String>,

    /// Local install script
    #[arg(long, default_value = INSTALL_SCRIPT)]
    pub install_script: String,

    /// Local config script, uploaded only with --agent-config
    #[arg(long, default_value = CONFIG_SCRIPT)]
    pub config_script: String,
}

impl DeployArgs {
    fn inputs(&self) -> DeployInputs<'_> {
        DeployInputs {
            archive: self.archive.as_deref().unwrap_or(""),
            home: self.home.as_deref(),
            agent_config: self.agent_config.as_deref(),
            install_script: &self.install_script,
            config_script: &self.config_script,
        }
    }
}

/// Validate every local input and build the per-host plan.
///
/// # Errors
///
/// Returns a `ValidationError` if any local file is missing or unusable.
pub fn build_plan(args: &DeployArgs, fs: &impl LocalFs, config: &DeployConfig) -> Result<Plan> {
    let request = preflight::deploy_request(fs, args.inputs(), config)?;
    Ok(plan::deploy_plan(&request))
}

/// Run the deploy command.
///
/// # Errors
///
/// Returns an error if the config or a local file is invalid. Host failures
/// are reported and turned into a failing exit code instead.
pub async fn run(
    app: &AppContext,
    args: &DeployArgs,
    source: &impl ConfigSource,
    fs: &impl LocalFs,
) -> Result<ExitCode> {
    let (config, _) = app.load_config(source)?;
    let plan = build_plan(args, fs, &config)?;
    let session = OpenSsh::from_config(&config);
    execute_plan(app, &config, "deploy", &plan, &session).await
}
