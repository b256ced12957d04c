//! Target host addresses.
//!
//! Host entries come from the `hosts` list of the config file and accept
//! `name`, `user@name`, `name:port` and `user@name:port`. IPv6 literals must
//! be bracketed when a port is given (`[::1]:2222`).

use std::fmt;

use crate::domain::error::ConfigError;

pub const DEFAULT_SSH_PORT: u16 = 22;

/// A single SSH destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub user: String,
    pub name: String,
    pub port: u16,
}

impl Host {
    /// Parse a host entry, falling back to `default_user` / `default_port`
    /// for the parts the entry leaves out.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHost` if the entry is empty, contains
    /// whitespace, starts with `-` (would be read as an ssh option), or has a
    /// malformed port.
    pub fn parse(entry: &str, default_user: &str, default_port: u16) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidHost {
            entry: entry.to_string(),
            reason: reason.to_string(),
        };

        let entry_trimmed = entry.trim();
        if entry_trimmed.is_empty() {
            return Err(invalid("empty host"));
        }
        if entry_trimmed.chars().any(char::is_whitespace) {
            return Err(invalid("whitespace is not allowed"));
        }

        let (user, rest) = match entry_trimmed.rsplit_once('@') {
            Some((user, rest)) => {
                if user.is_empty() {
                    return Err(invalid("empty user before '@'"));
                }
                (user, rest)
            }
            None => (default_user, entry_trimmed),
        };

        let (name, port) = split_port(rest).map_err(|reason| invalid(reason))?;
        let port = port.unwrap_or(default_port);

        if name.is_empty() {
            return Err(invalid("empty host name"));
        }
        if name.starts_with('-') || user.starts_with('-') {
            return Err(invalid("must not start with '-'"));
        }

        Ok(Self {
            user: user.to_string(),
            name: name.to_string(),
            port,
        })
    }

    /// The `user@name` destination passed to ssh.
    #[must_use]
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.name)
    }
}

fn split_port(rest: &str) -> Result<(&str, Option<u16>), &'static str> {
    if let Some(bracketed) = rest.strip_prefix('[') {
        let (name, after) = bracketed
            .split_once(']')
            .ok_or("unterminated '[' in IPv6 address")?;
        return match after.strip_prefix(':') {
            Some(port) => Ok((name, Some(parse_port(port)?))),
            None if after.is_empty() => Ok((name, None)),
            None => Err("unexpected text after ']'"),
        };
    }

    // A bare IPv6 literal has several colons and no port.
    if rest.matches(':').count() > 1 {
        return Ok((rest, None));
    }

    match rest.split_once(':') {
        Some((name, port)) => Ok((name, Some(parse_port(port)?))),
        None => Ok((rest, None)),
    }
}

fn parse_port(port: &str) -> Result<u16, &'static str> {
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err("invalid port number"),
        Ok(p) => Ok(p),
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.contains(':') {
            format!("[{}]", self.name)
        } else {
            self.name.clone()
        };
        if self.port == DEFAULT_SSH_PORT {
            write!(f, "{}@{name}", self.user)
        } else {
            write!(f, "{}@{name}:{}", self.user, self.port)
        }
    }
}
