//! Interval sampling of the running aggregate.

use dirstats_core::{AggregateStats, DEFAULT_SAMPLE_INTERVAL, Snapshot};

/// Takes a copy of the aggregate every `interval` visits.
///
/// Call [`observe`](Self::observe) once per visit, before the visit is
/// folded into the aggregate. Visit `i` (counted from 0) is sampled when
/// `i % interval == 0`, so the first sample is always the empty aggregate.
#[derive(Debug, Clone)]
pub struct Snapshotter {
    interval: u64,
    seen: u64,
    samples: Vec<Snapshot>,
}

impl Snapshotter {
    /// Create a snapshotter. An interval of 0 is treated as 1.
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            seen: 0,
            samples: Vec::new(),
        }
    }

    /// Sampling interval.
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Number of visits observed so far.
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Samples taken so far, oldest first.
    pub fn samples(&self) -> &[Snapshot] {
        &self.samples
    }

    /// Consume the snapshotter and return the samples.
    pub fn into_samples(self) -> Vec<Snapshot> {
        self.samples
    }

    /// Count one visit, sampling `stats` if this visit falls on the interval.
    pub fn observe(&mut self, stats: &AggregateStats) {
        if self.seen % self.interval == 0 {
            self.samples.push(Snapshot::capture(self.seen, stats));
        }
        self.seen += 1;
    }
}

impl Default for Snapshotter {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_INTERVAL)
    }
}
