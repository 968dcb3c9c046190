//! Filesystem capabilities used by the walker.

use std::io;
use std::path::Path;

use dirstats_core::{DirChild, EntryKind, EntryMetadata};

/// The two operations a walk needs from the filesystem.
///
/// Implementations must not follow symbolic links in `stat_entry`.
pub trait FileSystem {
    /// Read all children of a directory in one batch, in whatever order the
    /// underlying listing returns them.
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirChild>>;

    /// Link-aware stat of a single node.
    fn stat_entry(&self, path: &Path) -> io::Result<EntryMetadata>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirChild>> {
        (**self).list_children(path)
    }

    fn stat_entry(&self, path: &Path) -> io::Result<EntryMetadata> {
        (**self).stat_entry(path)
    }
}

/// The real filesystem, through `std::fs`.
///
/// Listing order is the platform's native `readdir` order and is not stable
/// across platforms or even across runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirChild>> {
        let mut children = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let kind_hint = entry.file_type().ok().map(kind_of);
            children.push(DirChild::new(entry.file_name(), kind_hint));
        }
        Ok(children)
    }

    fn stat_entry(&self, path: &Path) -> io::Result<EntryMetadata> {
        let metadata = std::fs::symlink_metadata(path)?;
        Ok(EntryMetadata::new(
            kind_of(metadata.file_type()),
            get_mode(&metadata),
            metadata.len(),
            metadata.modified().unwrap_or(std::time::UNIX_EPOCH),
        ))
    }
}

/// Sorts every listing by name before handing it to the walker.
///
/// Wrap a filesystem in this when repeated walks must visit entries in the
/// same order.
#[derive(Debug, Clone, Default)]
pub struct SortedFileSystem<F> {
    inner: F,
}

impl<F> SortedFileSystem<F> {
    /// Wrap a filesystem.
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: FileSystem> FileSystem for SortedFileSystem<F> {
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirChild>> {
        let mut children = self.inner.list_children(path)?;
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    fn stat_entry(&self, path: &Path) -> io::Result<EntryMetadata> {
        self.inner.stat_entry(path)
    }
}

fn kind_of(file_type: std::fs::FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

/// Get the permission bits from metadata.
#[cfg(unix)]
fn get_mode(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn get_mode(_metadata: &std::fs::Metadata) -> u32 {
    0
}
