//! `agentship config`: show the resolved deployment config.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::ConfigSource;

/// Run the config command. The password is always redacted.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or rendered.
pub fn run(app: &AppContext, source: &impl ConfigSource) -> Result<ExitCode> {
    let (config, path) = app.load_config(source)?;
    app.renderer().render_config(&config, &path)?;
    Ok(ExitCode::SUCCESS)
}
