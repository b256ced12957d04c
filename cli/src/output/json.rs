//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, and the renderer for successful results.

use std::path::Path;

use agentship_common::RunReport;
use anyhow::{Context, Result};

use crate::domain::DeployConfig;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails (`serde_json` only fails on
/// non-finite floats and maps with non-string keys, neither of which appear here).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders results as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_report(report: &RunReport) -> Result<()> {
        let text = serde_json::to_string_pretty(report).context("JSON serialization failed")?;
        println!("{text}");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(config: &DeployConfig, path: &Path) -> Result<()> {
        println!("{}", config_json(config, path)?);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        let obj = serde_json::json!({ "version": version });
        let text = serde_json::to_string_pretty(&obj).context("JSON serialization failed")?;
        println!("{text}");
        Ok(())
    }
}

/// The config as a JSON document, with the password redacted.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn config_json(config: &DeployConfig, path: &Path) -> Result<String> {
    let hosts: Vec<String> = config.hosts.iter().map(ToString::to_string).collect();
    let obj = serde_json::json!({
        "path": path.display().to_string(),
        "user": config.user,
        "appd-home": config.home,
        "credentials": config.credentials.describe(),
        "parallel": config.parallel,
        "connect_timeout": config.connect_timeout.as_secs(),
        "hosts": hosts,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
