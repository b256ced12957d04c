//! `agentship check`: confirm every host is reachable.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::ConfigSource;
use crate::commands::execute_plan;
use crate::domain::plan::check_plan;
use crate::infra::ssh::OpenSsh;

/// Run the check command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
pub async fn run(app: &AppContext, source: &impl ConfigSource) -> Result<ExitCode> {
    let (config, _) = app.load_config(source)?;
    let plan = check_plan(&config.home);
    let session = OpenSsh::from_config(&config);
    execute_plan(app, &config, "check", &plan, &session).await
}
