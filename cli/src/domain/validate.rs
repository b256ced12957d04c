//! Local file argument validation.
//!
//! The filesystem lookup itself happens behind the `LocalFs` port; this
//! module only decides what a given lookup result means.

use std::path::{Path, PathBuf};

use crate::domain::error::ValidationError;

/// What the local filesystem reports for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalFileState {
    Missing,
    RegularFile,
    /// Exists but is a directory, socket, etc.
    Other,
}

/// A local file that will be uploaded, plus the name it gets remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub local: PathBuf,
    /// Final path component of `local`; the file is always referred to by
    /// this name on the remote host.
    pub name: String,
}

impl Artifact {
    /// Build an artifact from a path whose base name is non-empty.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        artifact_name(&path.to_string_lossy()).map(|name| Self {
            local: path.to_path_buf(),
            name: name.to_string(),
        })
    }
}

/// Base name of a local path, accepting both `/` and `\` separators.
///
/// Returns `None` for an empty name and for `.` / `..`.
#[must_use]
pub fn artifact_name(path: &str) -> Option<&str> {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}

/// Check a local file argument.
///
/// `what` names the argument and `usage` is the usage line shown when the
/// argument is missing or unusable.
///
/// # Errors
///
/// - `MissingArgument` when `arg` is empty or whitespace.
/// - `NotFound` when the path does not exist.
/// - `NotAFile` when it exists but is not a regular file, or has no usable
///   base name.
pub fn validate_file(
    arg: &str,
    state: LocalFileState,
    what: &'static str,
    usage: &'static str,
) -> Result<Artifact, ValidationError> {
    if arg.trim().is_empty() {
        return Err(ValidationError::MissingArgument { what, usage });
    }
    match state {
        LocalFileState::Missing => Err(ValidationError::NotFound {
            path: arg.to_string(),
            usage,
        }),
        LocalFileState::Other => Err(ValidationError::NotAFile {
            path: arg.to_string(),
            usage,
        }),
        LocalFileState::RegularFile => {
            Artifact::from_path(Path::new(arg)).ok_or_else(|| ValidationError::NotAFile {
                path: arg.to_string(),
                usage,
            })
        }
    }
}
