//! Error types for gemlock
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Lock file tokenizing and parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockfileError {
    /// Malformed input at a known position
    ///
    /// `line` is 1-based, `column` is the byte offset from the start of the line.
    #[error("{message} (at {}:{line}:{column})", .path.display())]
    Parse {
        message: String,
        line: usize,
        column: usize,
        path: PathBuf,
    },

    /// A token state the grammar does not allow to be reached.
    ///
    /// This signals a bug in gemlock, not in the lock file.
    #[error("internal error while reading {}: {message}", .path.display())]
    Defect { message: String, path: PathBuf },
}

impl LockfileError {
    /// Whether this is an internal defect rather than a problem with the input
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Defect { .. })
    }

    /// Position of a parse error as `(line, column)`
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Parse { line, column, .. } => Some((*line, *column)),
            Self::Defect { .. } => None,
        }
    }
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to write file
    #[error("Failed to write file '{}': {error}", .path.display())]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{}': {error}", .path.display())]
    ReadFile { path: PathBuf, error: String },
}

/// Top-level gemlock error type
#[derive(Error, Debug)]
pub enum GemlockError {
    /// Lock file could not be read as a lock file
    #[error(transparent)]
    Lockfile(#[from] LockfileError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}
