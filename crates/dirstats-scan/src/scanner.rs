//! Statistics scan: walker, aggregator and snapshotter composed together.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use dirstats_core::{AggregateStats, Entry, EntryError, ScanError, Snapshot, WalkConfig};

use crate::aggregator::Aggregator;
use crate::fs::{FileSystem, OsFileSystem, SortedFileSystem};
use crate::snapshot::Snapshotter;
use crate::walker::{VisitControl, Visitor, Walker};

/// Visitor that aggregates every entry and samples the aggregate.
///
/// Never asks the walker to skip or stop. Usable on its own with a custom
/// [`Walker`] when the caller wants partial results after an abort.
#[derive(Debug, Clone)]
pub struct StatsVisitor {
    aggregator: Aggregator,
    snapshotter: Snapshotter,
}

impl StatsVisitor {
    /// Create a visitor sampling every `sample_interval` visits.
    pub fn new(sample_interval: u64) -> Self {
        Self {
            aggregator: Aggregator::new(),
            snapshotter: Snapshotter::new(sample_interval),
        }
    }

    /// Current aggregate.
    pub fn stats(&self) -> &AggregateStats {
        self.aggregator.stats()
    }

    /// Samples taken so far.
    pub fn snapshots(&self) -> &[Snapshot] {
        self.snapshotter.samples()
    }

    /// Number of visits seen, including ignored and failed ones.
    pub fn visits(&self) -> u64 {
        self.snapshotter.seen()
    }

    /// Split into the final aggregate and the ordered samples.
    pub fn finish(self) -> (AggregateStats, Vec<Snapshot>) {
        (self.aggregator.into_stats(), self.snapshotter.into_samples())
    }
}

impl Visitor for StatsVisitor {
    fn visit(
        &mut self,
        path: &Path,
        entry: Option<&Entry>,
        error: Option<&EntryError>,
    ) -> Result<VisitControl, ScanError> {
        self.snapshotter.observe(self.aggregator.stats());
        self.aggregator.record(path, entry, error);
        Ok(VisitControl::Continue)
    }
}

/// Result of a completed scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Root path as given.
    pub root: PathBuf,
    /// Final aggregate.
    pub stats: AggregateStats,
    /// Samples in visit order.
    pub snapshots: Vec<Snapshot>,
    /// Visits made by the walker.
    pub visits: u64,
    /// Duration of the scan.
    pub scan_duration: Duration,
    /// Configuration used.
    pub config: WalkConfig,
}

impl ScanReport {
    /// Check if any entry-level error was counted.
    pub fn has_errors(&self) -> bool {
        self.stats.error_count > 0
    }
}

/// Single-threaded statistics scanner.
#[derive(Debug, Clone, Default)]
pub struct StatsScanner<F = OsFileSystem> {
    fs: F,
}

impl StatsScanner<OsFileSystem> {
    /// Create a scanner over the real filesystem.
    pub fn new() -> Self {
        Self { fs: OsFileSystem }
    }
}

impl<F: FileSystem> StatsScanner<F> {
    /// Create a scanner over any filesystem.
    pub fn with_filesystem(fs: F) -> Self {
        Self { fs }
    }

    /// Walk `config.root` and collect its statistics.
    ///
    /// Fails if the configuration is invalid or the root cannot be stat-ed.
    /// Failures below the root are counted in `error_count` instead.
    pub fn scan(&self, config: &WalkConfig) -> Result<ScanReport, ScanError> {
        config
            .validate()
            .map_err(|message| ScanError::InvalidConfig { message })?;

        let start = Instant::now();
        let root = config.root.as_path();
        self.fs
            .stat_entry(root)
            .map_err(|e| ScanError::io(root, e))?;

        info!(
            root = %root.display(),
            interval = config.sample_interval,
            sorted = config.sort_children,
            "scan started"
        );

        let mut visitor = StatsVisitor::new(config.sample_interval);
        if config.sort_children {
            Walker::new(SortedFileSystem::new(&self.fs)).walk(root, &mut visitor)?;
        } else {
            Walker::new(&self.fs).walk(root, &mut visitor)?;
        }

        let visits = visitor.visits();
        let (stats, snapshots) = visitor.finish();
        let scan_duration = start.elapsed();

        info!(
            entries = stats.total_entries,
            errors = stats.error_count,
            snapshots = snapshots.len(),
            elapsed_ms = scan_duration.as_millis() as u64,
            "scan finished"
        );

        Ok(ScanReport {
            root: config.root.clone(),
            stats,
            snapshots,
            visits,
            scan_duration,
            config: config.clone(),
        })
    }
}

/// Scan a path on the real filesystem with the default configuration.
pub fn collect_stats(root: impl Into<PathBuf>) -> Result<ScanReport, ScanError> {
    StatsScanner::new().scan(&WalkConfig::new(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("a"), "aaa").unwrap();
        fs::write(root.join("b"), "bbbbb").unwrap();
        fs::write(root.join("sub/c"), "cc").unwrap();

        temp
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let report = collect_stats(temp.path()).unwrap();

        // The tempdir root is named, so it counts as a folder too
        assert_eq!(report.stats.total_entries, 5);
        assert_eq!(report.stats.folder_count, 2);
        assert_eq!(report.stats.file_count, 3);
        assert_eq!(report.stats.other_count, 0);
        assert_eq!(report.stats.total_size, 10);
        assert_eq!(report.visits, 5);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let result = collect_stats(temp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::NotFound { .. })));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let mut config = WalkConfig::new("/tmp");
        config.sample_interval = 0;
        let result = StatsScanner::new().scan(&config);
        assert!(matches!(result, Err(ScanError::InvalidConfig { .. })));
    }

    #[test]
    fn test_single_file_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("lonely.txt");
        fs::write(&file, "12345678").unwrap();

        let report = collect_stats(&file).unwrap();
        assert_eq!(report.stats.total_entries, 1);
        assert_eq!(report.stats.file_count, 1);
        assert_eq!(report.stats.total_size, 8);
        assert_eq!(report.stats.min_path_len(), report.stats.max_path_len);
    }
}
