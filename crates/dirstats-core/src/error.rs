//! Error types for walking and scanning.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors that abort a traversal.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A visitor asked for the walk to stop with a failure.
    #[error("Walk aborted at {path}: {message}")]
    Aborted { path: PathBuf, message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an abort error raised by a visitor.
    pub fn aborted(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Aborted {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Which filesystem operation failed for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryErrorKind {
    /// Listing the children of a directory failed.
    ReadDir,
    /// Link-aware stat of the entry failed.
    Stat,
}

/// Non-fatal failure on a single entry.
///
/// Handed to the visitor and then dropped; the walk carries on with the
/// remaining siblings.
#[derive(Debug, Error)]
#[error("{kind:?} failed for {path}: {source}")]
pub struct EntryError {
    /// Path the operation was attempted on.
    pub path: PathBuf,
    /// Operation that failed.
    pub kind: EntryErrorKind,
    /// Underlying failure.
    #[source]
    pub source: std::io::Error,
}

impl EntryError {
    /// Directory listing failure.
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            kind: EntryErrorKind::ReadDir,
            source,
        }
    }

    /// Stat failure.
    pub fn stat(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            kind: EntryErrorKind::Stat,
            source,
        }
    }

    /// Path the failure happened on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the failure was a permission problem.
    pub fn is_permission_denied(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::PermissionDenied
    }
}
