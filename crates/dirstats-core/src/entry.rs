//! Filesystem entry types seen during a walk.

use std::ffi::OsString;
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Owner, group and other execute bits.
pub const EXECUTE_BITS: u32 = 0o111;

/// Type of a filesystem node, as reported by a link-aware stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Directory.
    Directory,
    /// Regular file.
    File,
    /// Symbolic link. Never followed.
    Symlink,
    /// Other file types (sockets, devices, fifos, etc.).
    Other,
}

impl EntryKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }

    /// Check if this is a symlink.
    pub fn is_symlink(&self) -> bool {
        matches!(self, EntryKind::Symlink)
    }
}

/// Result of a link-aware stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    /// Node type.
    pub kind: EntryKind,
    /// Permission bits (0 where the platform has none).
    pub mode: u32,
    /// Size in bytes. For a symlink, the length of its target string.
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
}

impl EntryMetadata {
    /// Create metadata for a node.
    pub fn new(kind: EntryKind, mode: u32, size: u64, modified: SystemTime) -> Self {
        Self {
            kind,
            mode,
            size,
            modified,
        }
    }
}

/// One name returned by a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirChild {
    /// File name, not a path.
    pub name: OsString,
    /// Type reported by the listing itself, when the platform provides one.
    pub kind_hint: Option<EntryKind>,
}

impl DirChild {
    /// Create a listing entry.
    pub fn new(name: impl Into<OsString>, kind_hint: Option<EntryKind>) -> Self {
        Self {
            name: name.into(),
            kind_hint,
        }
    }
}

/// A single visited filesystem node.
///
/// Produced by the walker for one visit and not retained afterwards.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Path as built by the walker (not normalized).
    pub path: PathBuf,
    /// Base name of `path`.
    pub name: CompactString,
    /// Node type.
    pub kind: EntryKind,
    /// Permission bits.
    pub mode: u32,
    /// Size in bytes (only meaningful for non-directories).
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
}

impl Entry {
    /// Build an entry from a path and its stat result.
    pub fn new(path: impl Into<PathBuf>, metadata: EntryMetadata) -> Self {
        let path = path.into();
        Self {
            name: base_name(&path),
            path,
            kind: metadata.kind,
            mode: metadata.mode,
            size: metadata.size,
            modified: metadata.modified,
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Regular file with any execute bit set.
    pub fn is_executable(&self) -> bool {
        self.kind.is_file() && self.mode & EXECUTE_BITS != 0
    }

    /// Base name starts with a period.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Length of the path in bytes.
    pub fn path_len(&self) -> u64 {
        self.path.as_os_str().len() as u64
    }
}

/// Last element of a path.
///
/// Trailing separators are ignored. An empty path yields `.` and a path made
/// only of separators yields a single separator.
pub fn base_name(path: &Path) -> CompactString {
    let full = path.to_string_lossy();
    if full.is_empty() {
        return CompactString::new(".");
    }
    let trimmed = full.trim_end_matches(std::path::is_separator);
    if trimmed.is_empty() {
        return CompactString::new(MAIN_SEPARATOR_STR);
    }
    match trimmed.rfind(std::path::is_separator) {
        Some(idx) => CompactString::new(&trimmed[idx + 1..]),
        None => CompactString::new(trimmed),
    }
}
