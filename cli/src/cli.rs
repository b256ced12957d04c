//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, ConfigFlags, OutputFlags};
use crate::commands;
use crate::infra::config::JsonConfigSource;
use crate::infra::fs::StdLocalFs;

/// Push monitoring agents to remote hosts over SSH
#[derive(Parser)]
#[command(
    name = "agentship",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// JSON config file [env: AGENTSHIP_CONFIG]
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "env")]
    pub config: Option<PathBuf>,

    /// Environment name; reads config-<NAME>.json from the working directory
    #[arg(long, global = true, value_name = "NAME")]
    pub env: Option<String>,

    /// Maximum number of hosts worked on at once [default: from config]
    #[arg(long, global = true, value_name = "N")]
    pub parallel: Option<usize>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Increase diagnostic logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload, install, and clean up the agent on every host
    Deploy(commands::deploy::DeployArgs),

    /// Check that every host is reachable
    Check,

    /// Stage the agent archive and install scripts on every host
    Prep(commands::prep::PrepArgs),

    /// Run the staged installer on every host
    Install(commands::install::InstallArgs),

    /// Remove the staged archive and config from every host
    Cleanup(commands::cleanup::CleanupArgs),

    /// Show the resolved configuration
    Config,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or a local argument is invalid.
    /// Per-host failures are reported and mapped to the exit code instead.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            config,
            env,
            parallel,
            json,
            quiet,
            no_color,
            verbose: _,
            command,
        } = self;

        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            config: ConfigFlags {
                path: config,
                env,
                parallel,
            },
        });
        let source = JsonConfigSource;
        let fs = StdLocalFs;

        match command {
            Command::Deploy(args) => commands::deploy::run(&app, &args, &source, &fs).await,
            Command::Check => commands::check::run(&app, &source).await,
            Command::Prep(args) => commands::prep::run(&app, &args, &source, &fs).await,
            Command::Install(args) => commands::install::run(&app, &args, &source, &fs).await,
            Command::Cleanup(args) => commands::cleanup::run(&app, &args, &source).await,
            Command::Config => commands::config::run(&app, &source),
            Command::Version => commands::version::run(&app),
        }
    }
}
