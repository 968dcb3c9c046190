//! Text and CSV rendering of scan results.

use std::fmt::Write;

use crossterm::style::Stylize;

use dirstats_core::{AggregateStats, Snapshot};

/// Decimal byte units, largest value that fits in 64 bits last.
const UNITS: [(u64, &str); 6] = [
    (1_000, "kB"),
    (1_000_000, "MB"),
    (1_000_000_000, "GB"),
    (1_000_000_000_000, "TB"),
    (1_000_000_000_000_000, "PB"),
    (1_000_000_000_000_000_000, "EB"),
];

/// Column header of the snapshot CSV.
pub const CSV_HEADER: &str = "index,# entries incl. folders,# errors,max path len,min path len,\
avg path len,sum path len,# folders,# files,# symlinks,# hidden files,total file size";

/// Terminal styling, or none.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn label(&self, text: &str) -> String {
        if self.enabled {
            text.grey().to_string()
        } else {
            text.to_string()
        }
    }

    /// Non-zero values stand out in bold green.
    fn value(&self, n: u64, text: impl Into<String>) -> String {
        let text = text.into();
        if self.enabled && n > 0 {
            text.dark_green().bold().to_string()
        } else {
            text
        }
    }

    fn number(&self, n: u64) -> String {
        self.value(n, n.to_string())
    }
}

/// Human readable summary of the final aggregate.
pub fn summary(stats: &AggregateStats, max_decimals: Option<usize>, palette: Palette) -> String {
    let groups: [&[(&str, u64)]; 3] = [
        &[
            ("total entries including folders:", stats.total_entries),
            ("number of errors:", stats.error_count),
        ],
        &[
            ("sum path length:", stats.sum_path_len),
            ("max path length:", stats.max_path_len),
            ("min path length:", stats.min_path_len()),
            ("avg path length:", stats.avg_path_len),
        ],
        &[
            ("folders:     ", stats.folder_count),
            ("files:       ", stats.file_count),
            ("symlinks:    ", stats.other_count),
            ("hidden files:", stats.hidden_count),
            ("executables: ", stats.executable_count),
        ],
    ];

    let mut out = String::new();
    for group in groups {
        for (label, n) in group {
            let _ = writeln!(out, "{} {}", palette.label(label), palette.number(*n));
        }
        out.push('\n');
    }

    let size = format_bytes(stats.total_size, max_decimals);
    let _ = writeln!(
        out,
        "{} {}",
        palette.label("total file size:"),
        palette.value(stats.total_size, size)
    );
    out
}

/// One CSV row per snapshot, preceded by [`CSV_HEADER`].
pub fn csv(snapshots: &[Snapshot]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + snapshots.len() * 48);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for snapshot in snapshots {
        let s = &snapshot.stats;
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            snapshot.sample_index,
            s.total_entries,
            s.error_count,
            s.max_path_len,
            s.min_path_len(),
            s.avg_path_len,
            s.sum_path_len,
            s.folder_count,
            s.file_count,
            s.other_count,
            s.hidden_count,
            s.total_size,
        );
    }
    out
}

/// Format a byte count with decimal (power of 1000) units.
///
/// Values under 1000 print as whole bytes. Larger values print the shortest
/// exact decimal of the scaled value, truncated (not rounded) to
/// `max_decimals` digits when given.
pub fn format_bytes(bytes: u64, max_decimals: Option<usize>) -> String {
    if bytes < UNITS[0].0 {
        return format!("{bytes} B");
    }

    let (scale, unit) = UNITS
        .iter()
        .rev()
        .find(|(scale, _)| bytes >= *scale)
        .copied()
        .unwrap_or(UNITS[0]);

    let number = (bytes as f64 / scale as f64).to_string();
    format!("{} {unit}", truncate_decimals(&number, max_decimals))
}

fn truncate_decimals(number: &str, max_decimals: Option<usize>) -> &str {
    let (Some(max), Some(dot)) = (max_decimals, number.find('.')) else {
        return number;
    };
    if max == 0 {
        return &number[..dot];
    }
    &number[..number.len().min(dot + max + 1)]
}
