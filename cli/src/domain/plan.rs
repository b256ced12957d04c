//! Deployment plans: the ordered remote steps each task runs on a host.
//!
//! Plans are plain data so ordering rules can be checked without a network.
//! `crate::application::services::runbook` executes them.

use crate::domain::command::{RemoteCommand, remote_join};
use crate::domain::validate::Artifact;

/// Remote name of the install script (and its default local path).
pub const INSTALL_SCRIPT: &str = "local-agent-install.sh";
/// Default local path of the agent config script.
pub const CONFIG_SCRIPT: &str = "utils/local-agent-config.sh";

/// One remote step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Create `dir` with sudo and hand it to the connecting user, unless it
    /// already exists.
    EnsureHome { dir: String },
    /// Copy a local file to `<dir>/<artifact.name>`.
    Upload { artifact: Artifact, dir: String },
    MakeExecutable { dir: String, file: String },
    /// Unpack a zip in place, overwriting existing files.
    Extract { dir: String, file: String },
    RunInstaller {
        dir: String,
        script: String,
        flags: Vec<String>,
    },
    Remove { dir: String, file: String },
    /// Print a line on the host; its stdout is kept in the host report.
    Announce { message: String },
}

impl Step {
    /// Progress line shown while the step runs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::EnsureHome { dir, .. } => format!("checking home directory {dir}"),
            Self::Upload { artifact, dir } => format!("uploading {} to {dir}", artifact.name),
            Self::MakeExecutable { file, .. } => format!("marking {file} executable"),
            Self::Extract { file, .. } => format!("extracting {file}"),
            Self::RunInstaller { script, flags, .. } => {
                format!("running {script} {}", flags.join(" "))
            }
            Self::Remove { file, .. } => format!("removing {file}"),
            Self::Announce { .. } => "checking host".to_string(),
        }
    }

    /// The single remote command for steps that are one command.
    ///
    /// Returns `None` for `EnsureHome` (see [`home_probe`], [`home_create`],
    /// [`home_chown`]) and `Upload` (handled by the file transfer port).
    #[must_use]
    pub fn command(&self) -> Option<RemoteCommand> {
        match self {
            Self::EnsureHome { .. } | Self::Upload { .. } => None,
            Self::MakeExecutable { dir, file } => Some(
                RemoteCommand::new("chmod")
                    .args(["u+x", file.as_str()])
                    .in_dir(dir.as_str()),
            ),
            Self::Extract { dir, file } => Some(
                RemoteCommand::new("unzip")
                    .args(["-q", "-o", file.as_str()])
                    .in_dir(dir.as_str()),
            ),
            Self::RunInstaller { dir, script, flags } => Some(
                RemoteCommand::new(format!("./{script}"))
                    .args(flags.iter().map(String::as_str))
                    .in_dir(dir.as_str()),
            ),
            Self::Remove { dir, file } => Some(
                RemoteCommand::new("rm")
                    .args(["-f", file.as_str()])
                    .in_dir(dir.as_str()),
            ),
            Self::Announce { message } => Some(RemoteCommand::new("echo").arg(message.as_str())),
        }
    }

    /// Remote path written by an `Upload` step.
    #[must_use]
    pub fn upload_target(&self) -> Option<String> {
        match self {
            Self::Upload { artifact, dir } => Some(remote_join(dir, &artifact.name)),
            _ => None,
        }
    }
}

/// `sudo test -d <dir>`: succeeds when the home directory already exists.
#[must_use]
pub fn home_probe(dir: &str) -> RemoteCommand {
    RemoteCommand::new("test").args(["-d", dir]).sudo()
}

#[must_use]
pub fn home_create(dir: &str) -> RemoteCommand {
    RemoteCommand::new("mkdir").args(["-p", dir]).sudo()
}

#[must_use]
pub fn home_chown(dir: &str, owner: &str) -> RemoteCommand {
    RemoteCommand::new("chown")
        .args(["-R", &format!("{owner}:{owner}"), dir])
        .sudo()
}

/// An ordered list of steps run on every host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// ── Task plans ───────────────────────────────────────────────────────────────

/// The agent config file and the script that applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub script: Artifact,
    pub file: Artifact,
}

/// Validated inputs of a full deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub archive: Artifact,
    pub install_script: Artifact,
    pub agent_config: Option<AgentConfig>,
    pub home: String,
}

/// Full deployment: upload, install, clean up.
#[must_use]
pub fn deploy_plan(req: &DeployRequest) -> Plan {
    let home = req.home.clone();
    let script = req.install_script.name.clone();
    let mut steps = vec![
        Step::EnsureHome { dir: home.clone() },
        Step::Upload {
            artifact: req.install_script.clone(),
            dir: home.clone(),
        },
        Step::MakeExecutable {
            dir: home.clone(),
            file: script.clone(),
        },
        Step::Upload {
            artifact: req.archive.clone(),
            dir: home.clone(),
        },
    ];

    let mut flags = vec![format!("-a={}", req.archive.name)];
    if let Some(cfg) = &req.agent_config {
        steps.push(Step::Upload {
            artifact: cfg.script.clone(),
            dir: home.clone(),
        });
        steps.push(Step::MakeExecutable {
            dir: home.clone(),
            file: cfg.script.name.clone(),
        });
        steps.push(Step::Upload {
            artifact: cfg.file.clone(),
            dir: home.clone(),
        });
        flags.push(format!("-c={}", cfg.file.name));
    } else {
        flags.push(format!("-h={home}"));
    }

    steps.push(Step::RunInstaller {
        dir: home.clone(),
        script: script.clone(),
        flags,
    });

    steps.push(Step::Remove {
        dir: home.clone(),
        file: req.archive.name.clone(),
    });
    steps.push(Step::Remove {
        dir: home.clone(),
        file: script,
    });
    if let Some(cfg) = &req.agent_config {
        steps.push(Step::Remove {
            dir: home.clone(),
            file: cfg.script.name.clone(),
        });
        steps.push(Step::Remove {
            dir: home,
            file: cfg.file.name.clone(),
        });
    }

    Plan::new(steps)
}

/// Stage the archive and unpack the install scripts bundle.
#[must_use]
pub fn prep_plan(archive: &Artifact, scripts: &Artifact, home: &str) -> Plan {
    Plan::new(vec![
        Step::EnsureHome {
            dir: home.to_string(),
        },
        Step::Upload {
            artifact: archive.clone(),
            dir: home.to_string(),
        },
        Step::Upload {
            artifact: scripts.clone(),
            dir: home.to_string(),
        },
        Step::Extract {
            dir: home.to_string(),
            file: scripts.name.clone(),
        },
        Step::MakeExecutable {
            dir: home.to_string(),
            file: INSTALL_SCRIPT.to_string(),
        },
        Step::Remove {
            dir: home.to_string(),
            file: scripts.name.clone(),
        },
    ])
}

/// Run the staged installer, uploading the agent config first when given.
#[must_use]
pub fn install_plan(archive_name: &str, config: Option<&Artifact>, home: &str) -> Plan {
    let mut steps = Vec::new();
    let mut flags = vec![format!("-a={archive_name}")];
    if let Some(cfg) = config {
        steps.push(Step::Upload {
            artifact: cfg.clone(),
            dir: home.to_string(),
        });
        flags.push(format!("-c={}", cfg.name));
    }
    steps.push(Step::RunInstaller {
        dir: home.to_string(),
        script: INSTALL_SCRIPT.to_string(),
        flags,
    });
    Plan::new(steps)
}

/// Remove the staged archive and config by base name.
#[must_use]
pub fn cleanup_plan(archive_name: &str, config_name: Option<&str>, home: &str) -> Plan {
    let mut steps = vec![Step::Remove {
        dir: home.to_string(),
        file: archive_name.to_string(),
    }];
    if let Some(name) = config_name {
        steps.push(Step::Remove {
            dir: home.to_string(),
            file: name.to_string(),
        });
    }
    Plan::new(steps)
}

/// Connectivity check that also reports the configured home.
#[must_use]
pub fn check_plan(home: &str) -> Plan {
    Plan::new(vec![Step::Announce {
        message: format!("INFO: Host is valid. AppDynamics home is {home}"),
    }])
}
