//! Application context: unified state passed to every command handler.
//!
//! `AppContext` carries the output context, the output mode, and where the
//! deployment config comes from. Adding a new cross-cutting concern requires
//! only one field change here; command signatures stay the same.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigSource;
use crate::domain::{DeployConfig, env_config_file};
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Environment variable naming the default config file.
pub const CONFIG_ENV: &str = "AGENTSHIP_CONFIG";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Where the deployment config comes from.
#[derive(Debug, Clone, Default)]
pub struct ConfigFlags {
    /// Explicit path (`--config`).
    pub path: Option<PathBuf>,
    /// Environment name (`--env`), read from `config-<name>.json`.
    pub env: Option<String>,
    /// Override of the config's `parallel` value (`--parallel`).
    pub parallel: Option<usize>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Config selection options.
    pub config: ConfigFlags,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext` to all
/// command handlers.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    config: ConfigFlags,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config: flags.config,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter for a fan-out, silent in JSON mode.
    #[must_use]
    pub fn reporter(&self, message: &str) -> TerminalReporter<'_> {
        TerminalReporter::with_spinner(&self.output, self.is_json(), message)
    }

    /// Resolve the config file path.
    ///
    /// Precedence: `--config`, then `--env`, then `AGENTSHIP_CONFIG`.
    ///
    /// # Errors
    ///
    /// Returns an error if no source is given or the environment name is invalid.
    pub fn config_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config.path {
            return Ok(path.clone());
        }
        if let Some(name) = &self.config.env {
            return Ok(PathBuf::from(env_config_file(name)?));
        }
        match std::env::var(CONFIG_ENV) {
            Ok(val) if !val.trim().is_empty() => Ok(PathBuf::from(val)),
            _ => anyhow::bail!(
                "No config file given. Pass --config <path> or --env <name>, or set {CONFIG_ENV}."
            ),
        }
    }

    /// Load the deployment config and apply command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved or the config is
    /// unreadable or invalid.
    pub fn load_config(&self, source: &impl ConfigSource) -> Result<(DeployConfig, PathBuf)> {
        let path = self.config_path()?;
        let mut config = source
            .load(&path)
            .with_context(|| format!("loading config {}", path.display()))?;
        if let Some(parallel) = self.config.parallel {
            config.parallel = parallel.max(1);
        }
        Ok((config, path))
    }
}
