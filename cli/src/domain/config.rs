//! Domain types and validators for the deployment config file.
//!
//! Pure functions only: no I/O and no async. The loader
//! in `crate::infra::config` reads the file and hands the text to
//! [`DeployConfig::from_json`].

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::error::ConfigError;
use crate::domain::host::{DEFAULT_SSH_PORT, Host};

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_USER: &str = "appd";
pub const DEFAULT_HOME: &str = "/opt/AppDynamics";
pub const DEFAULT_PARALLEL: usize = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// ── Raw JSON schema ──────────────────────────────────────────────────────────

/// The config file exactly as written. Every key is optional; empty strings
/// and empty lists count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    user: Option<String>,
    password: Option<String>,
    key_filename: Option<KeyFilenames>,
    hosts: Option<Vec<String>>,
    #[serde(rename = "appd-home")]
    home: Option<String>,
    port: Option<u16>,
    parallel: Option<usize>,
    connect_timeout: Option<u64>,
}

/// `key_filename` may be a single path or an ordered list of paths.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeyFilenames {
    One(String),
    Many(Vec<String>),
}

impl KeyFilenames {
    fn into_paths(self) -> Vec<PathBuf> {
        let names = match self {
            Self::One(name) => vec![name],
            Self::Many(names) => names,
        };
        names
            .into_iter()
            .filter(|n| !n.trim().is_empty())
            .map(PathBuf::from)
            .collect()
    }
}

// ── Validated config ─────────────────────────────────────────────────────────

/// How ssh authenticates against every host.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Whatever the local ssh client would use on its own (agent, ~/.ssh keys).
    SshDefaults,
    Password(String),
    /// Private keys, tried in order.
    KeyFiles(Vec<PathBuf>),
}

impl Credentials {
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        match self {
            Self::Password(p) => Some(p),
            _ => None,
        }
    }

    /// Short human label; never includes the password.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::SshDefaults => "ssh defaults (agent / ~/.ssh)".to_string(),
            Self::Password(_) => "password (redacted)".to_string(),
            Self::KeyFiles(keys) => {
                let list: Vec<String> = keys.iter().map(|k| k.display().to_string()).collect();
                format!("key files: {}", list.join(", "))
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SshDefaults => f.write_str("SshDefaults"),
            Self::Password(_) => f.write_str("Password(<redacted>)"),
            Self::KeyFiles(keys) => f.debug_tuple("KeyFiles").field(keys).finish(),
        }
    }
}

/// Deployment settings, built once from the config file and passed explicitly
/// to every operation.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// SSH user for hosts that do not name their own.
    pub user: String,
    /// Target hosts in config order. Never empty.
    pub hosts: Vec<Host>,
    pub credentials: Credentials,
    /// Remote agent home directory.
    pub home: String,
    /// Upper bound on hosts worked on at the same time.
    pub parallel: usize,
    pub connect_timeout: Duration,
}

impl DeployConfig {
    /// Parse and validate a JSON config document.
    ///
    /// `origin` names the document in error messages (usually its path).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or wrongly typed
    /// values, `ConfigError::NoHosts` when `hosts` is missing or empty,
    /// `ConfigError::ConflictingCredentials` when both a password and key
    /// files are given, and `ConfigError::InvalidHost` for a bad host entry.
    pub fn from_json(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;

        let user = non_empty(raw.user).unwrap_or_else(|| DEFAULT_USER.to_string());
        let home = non_empty(raw.home).unwrap_or_else(|| DEFAULT_HOME.to_string());
        let port = raw.port.filter(|p| *p != 0).unwrap_or(DEFAULT_SSH_PORT);

        let entries: Vec<String> = raw
            .hosts
            .unwrap_or_default()
            .into_iter()
            .filter(|h| !h.trim().is_empty())
            .collect();
        if entries.is_empty() {
            return Err(ConfigError::NoHosts {
                origin: origin.to_string(),
            });
        }
        let hosts = entries
            .iter()
            .map(|entry| Host::parse(entry, &user, port))
            .collect::<Result<Vec<_>, _>>()?;

        let password = non_empty(raw.password);
        let keys = raw.key_filename.map(KeyFilenames::into_paths).unwrap_or_default();
        let credentials = match (password, keys.is_empty()) {
            (Some(_), false) => {
                return Err(ConfigError::ConflictingCredentials {
                    origin: origin.to_string(),
                });
            }
            (Some(password), true) => Credentials::Password(password),
            (None, false) => Credentials::KeyFiles(keys),
            (None, true) => Credentials::SshDefaults,
        };

        Ok(Self {
            user,
            hosts,
            credentials,
            home,
            parallel: raw.parallel.unwrap_or(DEFAULT_PARALLEL).max(1),
            connect_timeout: Duration::from_secs(
                raw.connect_timeout
                    .filter(|t| *t > 0)
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// File name for a named environment: `prod` → `config-prod.json`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvName` if `name` is empty or contains
/// anything but ASCII letters, digits, `-`, `_` and `.`, or is `.`/`..`.
pub fn env_config_file(name: &str) -> Result<String, ConfigError> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid {
        return Err(ConfigError::InvalidEnvName(name.to_string()));
    }
    Ok(format!("config-{name}.json"))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
