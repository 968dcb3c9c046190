//! In-memory filesystem for walker tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use dirstats_scan::{DirChild, EntryKind, EntryMetadata, FileSystem, join_path};

#[derive(Debug, Clone)]
enum MockNode {
    Dir { children: Vec<String>, readable: bool },
    File { size: u64, mode: u32 },
    Symlink { target: String },
    Socket,
    Unstatable,
}

/// Filesystem keyed by exact path strings.
///
/// Listings come back in the order the children were declared, so tests
/// can pin a "native" order that is deliberately not lexical.
#[derive(Debug, Default)]
pub struct MockFs {
    nodes: HashMap<String, MockNode>,
    hint_overrides: HashMap<String, EntryKind>,
    pub stat_log: RefCell<Vec<String>>,
    pub list_log: RefCell<Vec<String>>,
}

impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, path: &str, children: &[&str]) -> Self {
        self.nodes.insert(
            path.to_string(),
            MockNode::Dir {
                children: children.iter().map(|c| c.to_string()).collect(),
                readable: true,
            },
        );
        self
    }

    pub fn locked_dir(mut self, path: &str, children: &[&str]) -> Self {
        self.nodes.insert(
            path.to_string(),
            MockNode::Dir {
                children: children.iter().map(|c| c.to_string()).collect(),
                readable: false,
            },
        );
        self
    }

    pub fn file(mut self, path: &str, size: u64) -> Self {
        self.nodes
            .insert(path.to_string(), MockNode::File { size, mode: 0o644 });
        self
    }

    pub fn exec_file(mut self, path: &str, size: u64) -> Self {
        self.nodes
            .insert(path.to_string(), MockNode::File { size, mode: 0o755 });
        self
    }

    pub fn symlink(mut self, path: &str, target: &str) -> Self {
        self.nodes.insert(
            path.to_string(),
            MockNode::Symlink {
                target: target.to_string(),
            },
        );
        self
    }

    pub fn socket(mut self, path: &str) -> Self {
        self.nodes.insert(path.to_string(), MockNode::Socket);
        self
    }

    pub fn unstatable(mut self, path: &str) -> Self {
        self.nodes.insert(path.to_string(), MockNode::Unstatable);
        self
    }

    /// Make listings report `kind` for `path` regardless of what stat says.
    pub fn hint(mut self, path: &str, kind: EntryKind) -> Self {
        self.hint_overrides.insert(path.to_string(), kind);
        self
    }

    pub fn was_stated(&self, path: &str) -> bool {
        self.stat_log.borrow().iter().any(|p| p == path)
    }

    pub fn was_listed(&self, path: &str) -> bool {
        self.list_log.borrow().iter().any(|p| p == path)
    }

    fn kind_of(&self, path: &str) -> Option<EntryKind> {
        if let Some(kind) = self.hint_overrides.get(path) {
            return Some(*kind);
        }
        match self.nodes.get(path)? {
            MockNode::Dir { .. } => Some(EntryKind::Directory),
            MockNode::File { .. } => Some(EntryKind::File),
            MockNode::Symlink { .. } => Some(EntryKind::Symlink),
            MockNode::Socket => Some(EntryKind::Other),
            MockNode::Unstatable => None,
        }
    }
}

fn key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl FileSystem for MockFs {
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirChild>> {
        let path_key = key(path);
        self.list_log.borrow_mut().push(path_key.clone());

        match self.nodes.get(&path_key) {
            Some(MockNode::Dir {
                children,
                readable: true,
            }) => Ok(children
                .iter()
                .map(|name| {
                    let child_key = key(&join_path(path, OsStr::new(name)));
                    DirChild::new(name, self.kind_of(&child_key))
                })
                .collect()),
            Some(MockNode::Dir {
                readable: false, ..
            }) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )),
            Some(_) => Err(io::Error::other("not a directory")),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such node")),
        }
    }

    fn stat_entry(&self, path: &Path) -> io::Result<EntryMetadata> {
        let path_key = key(path);
        self.stat_log.borrow_mut().push(path_key.clone());

        let modified = SystemTime::UNIX_EPOCH;
        match self.nodes.get(&path_key) {
            Some(MockNode::Dir { .. }) => Ok(EntryMetadata::new(
                EntryKind::Directory,
                0o755,
                4096,
                modified,
            )),
            Some(MockNode::File { size, mode }) => {
                Ok(EntryMetadata::new(EntryKind::File, *mode, *size, modified))
            }
            Some(MockNode::Symlink { target }) => Ok(EntryMetadata::new(
                EntryKind::Symlink,
                0o777,
                target.len() as u64,
                modified,
            )),
            Some(MockNode::Socket) => Ok(EntryMetadata::new(EntryKind::Other, 0o600, 0, modified)),
            Some(MockNode::Unstatable) => Err(io::Error::other("stale file handle")),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such node")),
        }
    }
}

/// The tree from the design notes: `a` (3 bytes), `b` (5 bytes) and
/// `sub/c` (2 bytes) under `.`.
pub fn sample_tree() -> MockFs {
    MockFs::new()
        .dir(".", &["b", "sub", "a"])
        .file("./a", 3)
        .file("./b", 5)
        .dir("./sub", &["c"])
        .file("./sub/c", 2)
}
