//! Aggregate statistics and their sampled snapshots.

use serde::{Serialize, Serializer};

/// Running statistics for one traversal.
///
/// `total_entries == folder_count + file_count + other_count` holds after
/// every update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    /// Entries counted, directories included.
    pub total_entries: u64,
    /// Entry-level failures (unreadable directories, failed stats).
    pub error_count: u64,

    /// Sum of all path lengths in bytes.
    pub sum_path_len: u64,
    /// Longest path seen.
    pub max_path_len: u64,
    /// Shortest path seen, unset until the first entry.
    #[serde(serialize_with = "serialize_min")]
    min_path_len: Option<u64>,
    /// `sum_path_len / total_entries`, truncated.
    pub avg_path_len: u64,

    /// Directories.
    pub folder_count: u64,
    /// Regular files.
    pub file_count: u64,
    /// Symlinks and every other non-regular, non-directory node.
    pub other_count: u64,
    /// Regular files with an execute bit set.
    pub executable_count: u64,
    /// Entries whose name starts with a period.
    pub hidden_count: u64,

    /// Sum of non-directory sizes in bytes.
    pub total_size: u64,
}

fn serialize_min<S: Serializer>(min: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(min.unwrap_or(0))
}

impl AggregateStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortest path length, or 0 if nothing has been counted.
    pub fn min_path_len(&self) -> u64 {
        self.min_path_len.unwrap_or(0)
    }

    /// Shortest path length, `None` if nothing has been counted.
    pub fn raw_min_path_len(&self) -> Option<u64> {
        self.min_path_len
    }

    /// Count an entry-level failure.
    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    /// Record a directory.
    pub fn record_dir(&mut self, path_len: u64) {
        self.folder_count += 1;
        self.record_path(path_len);
    }

    /// Record a regular file.
    pub fn record_file(&mut self, path_len: u64, size: u64, executable: bool) {
        self.file_count += 1;
        if executable {
            self.executable_count += 1;
        }
        self.record_path(path_len);
        self.total_size += size;
    }

    /// Record a symlink or any other non-regular node.
    pub fn record_other(&mut self, path_len: u64, size: u64) {
        self.other_count += 1;
        self.record_path(path_len);
        self.total_size += size;
    }

    /// Record a hidden entry. Counted on top of its kind.
    pub fn record_hidden(&mut self) {
        self.hidden_count += 1;
    }

    fn record_path(&mut self, path_len: u64) {
        self.total_entries += 1;
        self.sum_path_len += path_len;
        self.max_path_len = self.max_path_len.max(path_len);
        self.min_path_len = Some(self.min_path_len.map_or(path_len, |min| min.min(path_len)));
        self.avg_path_len = self.sum_path_len / self.total_entries;
    }

    /// Fold another aggregate into this one.
    ///
    /// Counters add, extremes combine and the average is recomputed from the
    /// merged sum.
    pub fn merge(&mut self, other: &AggregateStats) {
        self.total_entries += other.total_entries;
        self.error_count += other.error_count;
        self.sum_path_len += other.sum_path_len;
        self.max_path_len = self.max_path_len.max(other.max_path_len);
        self.min_path_len = match (self.min_path_len, other.min_path_len) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.avg_path_len = self
            .sum_path_len
            .checked_div(self.total_entries)
            .unwrap_or(0);
        self.folder_count += other.folder_count;
        self.file_count += other.file_count;
        self.other_count += other.other_count;
        self.executable_count += other.executable_count;
        self.hidden_count += other.hidden_count;
        self.total_size += other.total_size;
    }

    /// Check that the kind buckets add up to the entry total.
    pub fn is_consistent(&self) -> bool {
        self.total_entries == self.folder_count + self.file_count + self.other_count
    }
}

/// Point-in-time copy of the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Number of visits processed before this sample was taken.
    pub sample_index: u64,
    /// Aggregate as it stood at that moment.
    #[serde(flatten)]
    pub stats: AggregateStats,
}

impl Snapshot {
    /// Copy the aggregate as sample number `sample_index`.
    pub fn capture(sample_index: u64, stats: &AggregateStats) -> Self {
        Self {
            sample_index,
            stats: *stats,
        }
    }
}
