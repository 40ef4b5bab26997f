//! Heap configuration parameters.

use crate::error::ConfigError;

/// Configuration for a [`GcHeap`](crate::GcHeap).
///
/// Controls the hard memory limit and the threshold schedule that decides
/// when a collection is due. Validated by [`GcHeap::new`](crate::GcHeap::new);
/// all values are immutable after the heap is created.
#[derive(Clone, Debug)]
pub struct HeapConfig {
    /// Hard cap on bytes in use. Requests that would exceed it fail with
    /// [`HeapError::OutOfMemory`](crate::HeapError::OutOfMemory).
    ///
    /// Default: `None` (unbounded).
    pub memory_limit: Option<usize>,

    /// Bytes in use at which the first collection becomes due.
    ///
    /// Default: 8192.
    pub initial_threshold: usize,

    /// Next threshold after a collection, as a percentage of the bytes
    /// still live when the collection finished.
    ///
    /// Default: 200 (the heap may double before collecting again).
    /// Must be at least 100.
    pub threshold_ratio_percent: u32,
}

impl HeapConfig {
    /// Default first collection threshold in bytes.
    pub const DEFAULT_INITIAL_THRESHOLD: usize = 8 * 1024;

    /// Default threshold growth ratio.
    pub const DEFAULT_THRESHOLD_RATIO_PERCENT: u32 = 200;

    /// Create an unbounded config with default thresholds.
    pub fn new() -> Self {
        Self {
            memory_limit: None,
            initial_threshold: Self::DEFAULT_INITIAL_THRESHOLD,
            threshold_ratio_percent: Self::DEFAULT_THRESHOLD_RATIO_PERCENT,
        }
    }

    /// Create a config with a hard memory limit in bytes.
    ///
    /// The initial threshold is lowered to the limit if it would
    /// otherwise exceed it.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            memory_limit: Some(limit),
            initial_threshold: Self::DEFAULT_INITIAL_THRESHOLD.min(limit),
            ..Self::new()
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold_ratio_percent < 100 {
            return Err(ConfigError::ThresholdRatioTooSmall {
                configured: self.threshold_ratio_percent,
            });
        }
        if let Some(limit) = self.memory_limit {
            if self.initial_threshold > limit {
                return Err(ConfigError::ThresholdAboveLimit {
                    threshold: self.initial_threshold,
                    limit,
                });
            }
        }
        Ok(())
    }

    /// Threshold to use after a collection leaves `live_bytes` in use.
    ///
    /// Never drops below `initial_threshold`.
    pub fn next_threshold(&self, live_bytes: usize) -> usize {
        let scaled = live_bytes.saturating_mul(self.threshold_ratio_percent as usize) / 100;
        scaled.max(self.initial_threshold)
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self::new()
    }
}
