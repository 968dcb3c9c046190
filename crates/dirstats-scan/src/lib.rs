//! Directory walker and statistics engine for dirstats.
//!
//! This crate walks a directory tree depth-first, one node at a time,
//! folding every entry into a running aggregate and sampling that aggregate
//! at a fixed interval.
//!
//! # Overview
//!
//! - **[`Walker`]** visits the root and every node beneath it without
//!   following symlinks. Unreadable directories and failed stats are handed
//!   to the visitor and the walk carries on.
//! - **[`Aggregator`]** counts entries by kind and tracks path lengths,
//!   sizes, hidden entries and executables.
//! - **[`Snapshotter`]** copies the aggregate every N visits, giving a
//!   time series of how the numbers grew during the walk.
//!
//! Children are visited in native listing order, which is not sorted and
//! not guaranteed to be stable. Final aggregates do not depend on it, the
//! intermediate snapshots do.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirstats_scan::{StatsScanner, WalkConfig};
//!
//! let config = WalkConfig::new("/path/to/scan");
//! let report = StatsScanner::new().scan(&config).unwrap();
//!
//! println!("Entries: {}", report.stats.total_entries);
//! println!("Total size: {} bytes", report.stats.total_size);
//! for snapshot in &report.snapshots {
//!     println!("{}: {}", snapshot.sample_index, snapshot.stats.total_entries);
//! }
//! ```
//!
//! # Custom visitors
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dirstats_scan::{OsFileSystem, VisitControl, Walker};
//!
//! let walker = Walker::new(OsFileSystem);
//! walker
//!     .walk_fn(Path::new("."), |path, entry, _error| {
//!         if entry.is_some_and(|e| e.is_dir() && e.name == "target") {
//!             return Ok(VisitControl::SkipSubtree);
//!         }
//!         println!("{}", path.display());
//!         Ok(VisitControl::Continue)
//!     })
//!     .unwrap();
//! ```

mod aggregator;
mod fs;
mod scanner;
mod snapshot;
mod walker;

pub use aggregator::Aggregator;
pub use fs::{FileSystem, OsFileSystem, SortedFileSystem};
pub use scanner::{ScanReport, StatsScanner, StatsVisitor, collect_stats};
pub use snapshot::Snapshotter;
pub use walker::{VisitControl, Visitor, Walker, join_path};

// Re-export core types for convenience
pub use dirstats_core::{
    AggregateStats, DirChild, Entry, EntryError, EntryErrorKind, EntryKind, EntryMetadata,
    ScanError, Snapshot, WalkConfig,
};
