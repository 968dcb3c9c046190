//! Core types for dirstats.
//!
//! This crate provides the data structures shared by the walker and its
//! consumers: visited entries, the running aggregate, sampled snapshots,
//! configuration and errors.

mod config;
mod entry;
mod error;
mod stats;

pub use config::{DEFAULT_SAMPLE_INTERVAL, WalkConfig, WalkConfigBuilder};
pub use entry::{DirChild, EXECUTE_BITS, Entry, EntryKind, EntryMetadata, base_name};
pub use error::{EntryError, EntryErrorKind, ScanError};
pub use stats::{AggregateStats, Snapshot};
