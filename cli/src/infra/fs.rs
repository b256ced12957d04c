//! Filesystem infrastructure: implements the `LocalFs` port.

use std::path::Path;

use crate::application::ports::LocalFs;
use crate::domain::LocalFileState;

/// Production filesystem implementation of `LocalFs`.
pub struct StdLocalFs;

impl LocalFs for StdLocalFs {
    fn file_state(&self, path: &Path) -> LocalFileState {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => LocalFileState::RegularFile,
            Ok(_) => LocalFileState::Other,
            Err(_) => LocalFileState::Missing,
        }
    }
}
