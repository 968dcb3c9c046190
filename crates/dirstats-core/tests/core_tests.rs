use dirstats_core::{
    AggregateStats, Entry, EntryKind, EntryMetadata, Snapshot, WalkConfig, base_name,
};
use std::path::Path;
use std::time::SystemTime;

#[test]
fn test_snapshot_json_flattens_stats() {
    let snapshot = Snapshot::capture(0, &AggregateStats::default());
    let json = serde_json::to_value(snapshot).unwrap();

    assert_eq!(json["sample_index"], 0);
    assert_eq!(json["total_entries"], 0);
    // Unset minimum is reported as 0, never as null
    assert_eq!(json["min_path_len"], 0);
    assert!(json.get("stats").is_none());
}

#[test]
fn test_stats_json_reports_real_minimum() {
    let mut stats = AggregateStats::new();
    stats.record_file(12, 100, false);
    stats.record_dir(7);

    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["min_path_len"], 7);
    assert_eq!(json["max_path_len"], 12);
    assert_eq!(json["avg_path_len"], 9);
    assert_eq!(json["total_size"], 100);
}

#[test]
fn test_config_round_trip_defaults() {
    let config: WalkConfig = serde_json::from_str(r#"{"root": "/srv"}"#).unwrap();
    assert_eq!(config.root, Path::new("/srv"));
    assert_eq!(config.sample_interval, 10);
    assert!(!config.sort_children);
}

#[test]
fn test_entry_kinds() {
    let now = SystemTime::now();
    let link = Entry::new("a/link", EntryMetadata::new(EntryKind::Symlink, 0o777, 6, now));
    assert!(link.kind.is_symlink());
    assert!(!link.is_dir());
    // Execute bits on a symlink do not make it an executable
    assert!(!link.is_executable());
    assert_eq!(link.size, 6);

    let dir = Entry::new("a/b/", EntryMetadata::new(EntryKind::Directory, 0o755, 4096, now));
    assert!(dir.is_dir());
    assert_eq!(dir.name, "b");
    assert_eq!(dir.modified, now);
}

#[test]
fn test_base_name_of_relative_paths() {
    assert_eq!(base_name(Path::new("./.hidden")), ".hidden");
    assert_eq!(base_name(Path::new("../up")), "up");
}
