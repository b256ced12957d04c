//! Infrastructure implementation of the `ConfigSource` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigSource;
use crate::domain::{Credentials, DeployConfig};

/// Reads the deployment config from a JSON file on disk.
pub struct JsonConfigSource;

impl ConfigSource for JsonConfigSource {
    fn load(&self, path: &Path) -> Result<DeployConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let mut config = DeployConfig::from_json(&content, &path.display().to_string())?;
        if let Credentials::KeyFiles(keys) = &mut config.credentials {
            for key in keys.iter_mut() {
                *key = expand_tilde(key);
            }
        }
        tracing::debug!(path = %path.display(), hosts = config.hosts.len(), "config loaded");
        Ok(config)
    }
}

/// Replace a leading `~` with the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
