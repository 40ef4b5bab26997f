//! Heap-specific error types.

use std::error::Error;
use std::fmt;

/// Errors raised by an [`Allocator`](crate::Allocator) when a request
/// cannot be satisfied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeapError {
    /// Satisfying the request would exceed the configured memory limit.
    OutOfMemory {
        /// Number of additional bytes the request needed.
        requested: usize,
        /// Bytes accounted as in use when the request was made.
        in_use: usize,
        /// The configured hard limit in bytes.
        limit: usize,
    },
    /// A byte size computation (`count * element_size`) overflowed `usize`.
    SizeOverflow {
        /// Number of elements requested.
        elements: usize,
        /// Bytes per element.
        element_size: usize,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory {
                requested,
                in_use,
                limit,
            } => {
                write!(
                    f,
                    "out of memory: requested {requested} bytes with {in_use} in use, limit {limit} bytes"
                )
            }
            Self::SizeOverflow {
                elements,
                element_size,
            } => {
                write!(
                    f,
                    "size overflow: {elements} elements of {element_size} bytes exceeds usize::MAX"
                )
            }
        }
    }
}

impl Error for HeapError {}

/// Errors detected during [`HeapConfig::validate()`](crate::HeapConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `threshold_ratio_percent` is below 100, so the collection
    /// threshold could drop under the live byte count.
    ThresholdRatioTooSmall {
        /// The configured ratio.
        configured: u32,
    },
    /// `initial_threshold` is larger than `memory_limit`, so a
    /// collection could never become due before allocation fails.
    ThresholdAboveLimit {
        /// The configured initial threshold.
        threshold: usize,
        /// The configured memory limit.
        limit: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdRatioTooSmall { configured } => {
                write!(
                    f,
                    "threshold_ratio_percent {configured} is below minimum of 100"
                )
            }
            Self::ThresholdAboveLimit { threshold, limit } => {
                write!(
                    f,
                    "initial_threshold {threshold} exceeds memory_limit {limit}"
                )
            }
        }
    }
}

impl Error for ConfigError {}
