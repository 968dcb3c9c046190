//! Walk configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default number of visits between two snapshots.
pub const DEFAULT_SAMPLE_INTERVAL: u64 = 10;

/// Configuration for a statistics walk.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Root path to walk. Used as given, never canonicalized, so path
    /// lengths are measured relative to what the caller typed.
    pub root: PathBuf,

    /// Number of visits between snapshots.
    #[builder(default = "DEFAULT_SAMPLE_INTERVAL")]
    #[serde(default = "default_sample_interval")]
    pub sample_interval: u64,

    /// Sort each directory listing by name instead of keeping the native
    /// enumeration order.
    #[builder(default = "false")]
    #[serde(default)]
    pub sort_children: bool,
}

fn default_sample_interval() -> u64 {
    DEFAULT_SAMPLE_INTERVAL
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if self.sample_interval == Some(0) {
            return Err("Sample interval must be at least 1".to_string());
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a config with defaults for walking a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            sort_children: false,
        }
    }

    /// Check a config that was built or deserialized without the builder.
    pub fn validate(&self) -> Result<(), String> {
        if self.root.as_os_str().is_empty() {
            return Err("Root path cannot be empty".to_string());
        }
        if self.sample_interval == 0 {
            return Err("Sample interval must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
