//! Per-entry statistics aggregation.

use std::path::Path;

use tracing::trace;

use dirstats_core::{AggregateStats, Entry, EntryError, EntryKind};

/// Folds visited entries into one [`AggregateStats`].
///
/// Entry-level failures are counted, never raised. The entry named `.` (the
/// root when walking the current directory) is ignored entirely so the root
/// is not counted as a folder of itself.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    stats: AggregateStats,
}

impl Aggregator {
    /// Create an aggregator with empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current aggregate.
    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    /// Consume the aggregator and return the final aggregate.
    pub fn into_stats(self) -> AggregateStats {
        self.stats
    }

    /// Record one visit.
    pub fn record(&mut self, path: &Path, entry: Option<&Entry>, error: Option<&EntryError>) {
        if entry.is_some_and(|e| e.name == ".") {
            return;
        }

        if let Some(error) = error {
            trace!(
                path = %path.display(),
                denied = error.is_permission_denied(),
                "counting entry error"
            );
            self.stats.record_error();
            return;
        }

        let Some(entry) = entry else {
            return;
        };

        let path_len = entry.path_len();
        match entry.kind {
            EntryKind::Directory => self.stats.record_dir(path_len),
            EntryKind::File => self
                .stats
                .record_file(path_len, entry.size, entry.is_executable()),
            // Symlinks share the bucket with sockets, devices and fifos.
            EntryKind::Symlink | EntryKind::Other => self.stats.record_other(path_len, entry.size),
        }

        if entry.is_hidden() {
            self.stats.record_hidden();
        }
    }
}
