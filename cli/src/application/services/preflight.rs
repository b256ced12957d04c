//! Application service: local checks that must pass before any host is contacted.

use std::path::Path;

use crate::application::ports::LocalFs;
use crate::domain::plan::{AgentConfig, DeployRequest};
use crate::domain::{Artifact, DeployConfig, LocalFileState, ValidationError, validate_file};

pub const DEPLOY_USAGE: &str = "agentship deploy --archive <path> [--home <dir>] [--agent-config <path>] [--install-script <path>] [--config-script <path>]";
pub const PREP_USAGE: &str = "agentship prep <archive> <scripts>";
pub const INSTALL_USAGE: &str = "agentship install <archive> <config>";
pub const CLEANUP_USAGE: &str = "agentship cleanup <archive> <config>";

/// Local inputs of `deploy`, as given on the command line.
#[derive(Debug, Clone, Copy)]
pub struct DeployInputs<'a> {
    pub archive: &'a str,
    pub home: Option<&'a str>,
    pub agent_config: Option<&'a str>,
    pub install_script: &'a str,
    pub config_script: &'a str,
}

/// Look `arg` up on disk and validate it as an upload source.
///
/// # Errors
///
/// See [`validate_file`].
pub fn check_file(
    fs: &impl LocalFs,
    arg: &str,
    what: &'static str,
    usage: &'static str,
) -> Result<Artifact, ValidationError> {
    let state = if arg.trim().is_empty() {
        LocalFileState::Missing
    } else {
        fs.file_state(Path::new(arg))
    };
    validate_file(arg, state, what, usage)
}

/// The artifact for `arg` if it is an existing regular file, else `None`.
pub fn existing_file(fs: &impl LocalFs, arg: &str) -> Option<Artifact> {
    if arg.trim().is_empty() || fs.file_state(Path::new(arg)) != LocalFileState::RegularFile {
        return None;
    }
    Artifact::from_path(Path::new(arg))
}

/// Validate every local file `deploy` will upload.
///
/// The config script is only checked when an agent config is given, since
/// it is only uploaded in that case.
///
/// # Errors
///
/// Returns the first `ValidationError`, in argument order.
pub fn deploy_request(
    fs: &impl LocalFs,
    inputs: DeployInputs<'_>,
    config: &DeployConfig,
) -> Result<DeployRequest, ValidationError> {
    let archive = check_file(fs, inputs.archive, "An agent archive", DEPLOY_USAGE)?;
    let install_script = check_file(fs, inputs.install_script, "An install script", DEPLOY_USAGE)?;
    let agent_config = match inputs.agent_config.filter(|c| !c.trim().is_empty()) {
        Some(file) => {
            let file = check_file(fs, file, "An agent config file", DEPLOY_USAGE)?;
            let script = check_file(fs, inputs.config_script, "A config script", DEPLOY_USAGE)?;
            Some(AgentConfig { script, file })
        }
        None => None,
    };
    let home = inputs
        .home
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or(config.home.as_str())
        .to_string();

    Ok(DeployRequest {
        archive,
        install_script,
        agent_config,
        home,
    })
}
