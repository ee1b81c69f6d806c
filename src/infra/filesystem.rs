//! Filesystem operations
//!
//! Reads and writes lock files. Nothing else in the crate touches the disk.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::FilesystemError;

/// Write content to a file, replacing whatever was there
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read content from a file, or `None` if it does not exist
pub fn read_file_if_exists(path: &Path) -> Result<Option<String>, FilesystemError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("{} does not exist", path.display());
            Ok(None)
        }
        Err(e) => Err(FilesystemError::ReadFile {
            path: path.to_path_buf(),
            error: e.to_string(),
        }),
    }
}
