//! Depth-first directory walker.
//!
//! The walker visits the root, then each child of every directory it meets,
//! recursively. Children are listed in one batch per directory and visited in
//! the order the [`FileSystem`] returns them; no sorting happens here. With
//! [`OsFileSystem`](crate::OsFileSystem) that order is the native `readdir`
//! order, which may change between platforms and between runs. Wrap the
//! filesystem in [`SortedFileSystem`](crate::SortedFileSystem) when a stable
//! order is needed.
//!
//! Symbolic links are never followed: every node is stat-ed with a
//! link-aware call and a symlink is never descended into.

use std::ffi::{OsStr, OsString};
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};

use tracing::debug;

use dirstats_core::{Entry, EntryError, EntryKind, ScanError};

use crate::fs::FileSystem;

/// What the walker should do after a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitControl {
    /// Keep going.
    Continue,
    /// For a directory, do not descend into it. For anything else, skip the
    /// remaining siblings in its parent directory. A child that could not be
    /// stat-ed counts as a directory when its listing said so.
    SkipSubtree,
    /// Stop the whole walk and report success.
    SkipAll,
}

/// Receives one call per visited node.
///
/// `entry` is `None` when the node could not be stat-ed; `error` is set when
/// stat-ing the node or listing its children failed. A directory whose
/// listing fails is visited twice: once normally and once with the error.
///
/// Returning `Err` aborts the walk and the error is handed back to the
/// caller of [`Walker::walk`] unchanged.
pub trait Visitor {
    fn visit(
        &mut self,
        path: &Path,
        entry: Option<&Entry>,
        error: Option<&EntryError>,
    ) -> Result<VisitControl, ScanError>;
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    fn visit(
        &mut self,
        path: &Path,
        entry: Option<&Entry>,
        error: Option<&EntryError>,
    ) -> Result<VisitControl, ScanError> {
        (**self).visit(path, entry, error)
    }
}

struct FnVisitor<F>(F);

impl<F> Visitor for FnVisitor<F>
where
    F: FnMut(&Path, Option<&Entry>, Option<&EntryError>) -> Result<VisitControl, ScanError>,
{
    fn visit(
        &mut self,
        path: &Path,
        entry: Option<&Entry>,
        error: Option<&EntryError>,
    ) -> Result<VisitControl, ScanError> {
        (self.0)(path, entry, error)
    }
}

/// How a subtree walk ended, as seen by its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    SkipSiblings,
    Stop,
}

/// Depth-first walker over a [`FileSystem`].
#[derive(Debug, Clone, Default)]
pub struct Walker<F> {
    fs: F,
}

impl<F: FileSystem> Walker<F> {
    /// Create a walker over a filesystem.
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Walk the tree rooted at `root`.
    ///
    /// The root is visited first whether or not it is a directory. If it
    /// cannot be stat-ed the visitor gets a single call carrying the error.
    pub fn walk<V: Visitor + ?Sized>(&self, root: &Path, visitor: &mut V) -> Result<(), ScanError> {
        match self.fs.stat_entry(root) {
            Ok(metadata) => {
                self.walk_node(Entry::new(root, metadata), None, visitor)?;
            }
            Err(source) => {
                let error = EntryError::stat(root, source);
                log_entry_error(&error, "cannot stat root");
                visitor.visit(root, None, Some(&error))?;
            }
        }
        Ok(())
    }

    /// Walk with a closure as the visitor.
    pub fn walk_fn<C>(&self, root: &Path, visit: C) -> Result<(), ScanError>
    where
        C: FnMut(&Path, Option<&Entry>, Option<&EntryError>) -> Result<VisitControl, ScanError>,
    {
        self.walk(root, &mut FnVisitor(visit))
    }

    fn walk_node<V: Visitor + ?Sized>(
        &self,
        entry: Entry,
        kind_hint: Option<EntryKind>,
        visitor: &mut V,
    ) -> Result<Flow, ScanError> {
        match visitor.visit(&entry.path, Some(&entry), None)? {
            VisitControl::Continue => {}
            VisitControl::SkipAll => return Ok(Flow::Stop),
            VisitControl::SkipSubtree if entry.is_dir() => return Ok(Flow::Next),
            VisitControl::SkipSubtree => return Ok(Flow::SkipSiblings),
        }

        // A listing that says "symlink" wins over a stat that raced with a
        // replacement of the node.
        if !entry.is_dir() || kind_hint.is_some_and(|kind| kind.is_symlink()) {
            return Ok(Flow::Next);
        }

        let children = match self.fs.list_children(&entry.path) {
            Ok(children) => children,
            Err(source) => {
                let error = EntryError::read_dir(&entry.path, source);
                log_entry_error(&error, "cannot read directory");
                return match visitor.visit(&entry.path, Some(&entry), Some(&error))? {
                    VisitControl::SkipAll => Ok(Flow::Stop),
                    VisitControl::Continue | VisitControl::SkipSubtree => Ok(Flow::Next),
                };
            }
        };

        for child in children {
            let path = join_path(&entry.path, &child.name);
            let flow = match self.fs.stat_entry(&path) {
                Ok(metadata) => {
                    self.walk_node(Entry::new(path, metadata), child.kind_hint, visitor)?
                }
                Err(source) => {
                    let error = EntryError::stat(&path, source);
                    log_entry_error(&error, "cannot stat entry");
                    // Without metadata the listing hint decides what a skip means.
                    let listed_dir = child.kind_hint.is_some_and(|kind| kind.is_dir());
                    match visitor.visit(&path, None, Some(&error))? {
                        VisitControl::Continue => Flow::Next,
                        VisitControl::SkipSubtree if listed_dir => Flow::Next,
                        VisitControl::SkipSubtree => Flow::SkipSiblings,
                        VisitControl::SkipAll => Flow::Stop,
                    }
                }
            };

            match flow {
                Flow::Next => {}
                Flow::SkipSiblings => break,
                Flow::Stop => return Ok(Flow::Stop),
            }
        }

        Ok(Flow::Next)
    }
}

fn log_entry_error(error: &EntryError, message: &str) {
    debug!(
        path = %error.path().display(),
        denied = error.is_permission_denied(),
        error = %error.source,
        "{message}"
    );
}

/// Join a directory path and a child name with the platform separator.
///
/// The result is not cleaned: `/` and `a` give `//a`, and a trailing
/// separator on `parent` is kept. An empty `parent` yields `name` alone.
pub fn join_path(parent: &Path, name: &OsStr) -> PathBuf {
    let parent = parent.as_os_str();
    if parent.is_empty() {
        return PathBuf::from(name);
    }
    let mut joined = OsString::with_capacity(parent.len() + MAIN_SEPARATOR_STR.len() + name.len());
    joined.push(parent);
    joined.push(MAIN_SEPARATOR_STR);
    joined.push(name);
    PathBuf::from(joined)
}
