//! Remote shell command construction.
//!
//! Every command sent to a host is built from a program and discrete
//! arguments and rendered into a single POSIX `sh` string here. Arguments
//! are quoted only when they contain shell metacharacters, so simple
//! commands stay readable in logs (`chmod u+x local-agent-install.sh`).

use std::borrow::Cow;
use std::fmt;

/// Characters that force an argument to be single-quoted.
const SHELL_META: &[char] = &[
    ' ', '\t', '\n', '\r', '\'', '"', '\\', '$', '`', '!', '*', '?', '[', ']', '(', ')', '{', '}',
    '<', '>', '|', '&', ';', '#', '~', '^',
];

/// Quote `arg` for a POSIX shell.
///
/// Empty strings become `''`. Strings containing metacharacters are wrapped
/// in single quotes with embedded `'` rewritten as `'\''`.
#[must_use]
pub fn quote(arg: &str) -> Cow<'_, str> {
    if arg.is_empty() {
        return Cow::Borrowed("''");
    }
    if !arg.contains(SHELL_META) {
        return Cow::Borrowed(arg);
    }
    Cow::Owned(format!("'{}'", arg.replace('\'', "'\\''")))
}

/// Join a remote directory and a file name with exactly one `/`.
#[must_use]
pub fn remote_join(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// How `sudo` should obtain credentials when a command needs elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SudoMode {
    /// `sudo -n`: fail instead of prompting (key or agent auth).
    NonInteractive,
    /// `sudo -S -p ''`: read the password from stdin.
    Stdin,
}

/// A program invocation to run on a remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<String>,
    sudo: bool,
    stdout_to: Option<String>,
}

impl RemoteCommand {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            sudo: false,
            stdout_to: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the command from `dir` (`cd <dir> && ...`).
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<String>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Run the program through `sudo`.
    #[must_use]
    pub fn sudo(mut self) -> Self {
        self.sudo = true;
        self
    }

    /// Redirect the program's stdout into `path` on the remote host.
    #[must_use]
    pub fn stdout_to(mut self, path: impl Into<String>) -> Self {
        self.stdout_to = Some(path.into());
        self
    }

    #[must_use]
    pub fn needs_sudo(&self) -> bool {
        self.sudo
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Render the command as one `sh` command line.
    #[must_use]
    pub fn render(&self, mode: SudoMode) -> String {
        let mut out = String::new();
        if let Some(dir) = &self.cwd {
            out.push_str("cd ");
            out.push_str(&quote(dir));
            out.push_str(" && ");
        }
        if self.sudo {
            match mode {
                SudoMode::NonInteractive => out.push_str("sudo -n "),
                SudoMode::Stdin => out.push_str("sudo -S -p '' "),
            }
        }
        out.push_str(&quote(&self.program));
        for arg in &self.args {
            out.push(' ');
            out.push_str(&quote(arg));
        }
        if let Some(path) = &self.stdout_to {
            out.push_str(" > ");
            out.push_str(&quote(path));
        }
        out
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(SudoMode::NonInteractive))
    }
}
