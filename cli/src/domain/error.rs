//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while turning a JSON document into a `DeployConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("You must define hosts in your JSON config file ({origin})")]
    NoHosts { origin: String },

    #[error(
        "{origin} sets both 'password' and 'key_filename'. Provide a password or SSH keys, not both."
    )]
    ConflictingCredentials { origin: String },

    #[error("Invalid host entry '{entry}': {reason}")]
    InvalidHost { entry: String, reason: String },

    #[error("Invalid environment name '{0}': use letters, digits, '-', '_' or '.'")]
    InvalidEnvName(String),

    #[error("cannot parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

// ── Local file validation errors ──────────────────────────────────────────────

/// Errors raised when a local file argument cannot be used for upload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{what} is required.\n\nUsage: {usage}")]
    MissingArgument {
        what: &'static str,
        usage: &'static str,
    },

    #[error("File not found: {path}\n\nUsage: {usage}")]
    NotFound { path: String, usage: &'static str },

    #[error("Not a regular file: {path}\n\nUsage: {usage}")]
    NotAFile { path: String, usage: &'static str },
}

// ── Remote step errors ────────────────────────────────────────────────────────

/// A remote step ran but reported failure.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("`{command}` exited with status {code}{}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("upload of {file} to {remote} exited with status {code}{}", stderr_suffix(.stderr))]
    UploadFailed {
        file: String,
        remote: String,
        code: i32,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}
