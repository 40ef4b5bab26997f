//! The collector-accounting heap.
//!
//! [`GcHeap`] is the allocator a managed runtime routes its internal
//! buffers through. Every block it hands out is charged against a running
//! byte count; crossing the collection threshold marks a collection as
//! due, and crossing the hard limit refuses the request.

use std::cell::Cell;

use crate::allocator::Allocator;
use crate::block::Block;
use crate::config::HeapConfig;
use crate::error::{ConfigError, HeapError};
use crate::stats::HeapStats;

/// Single-threaded allocator with byte-accurate collector accounting.
///
/// Accounting lives in [`Cell`]s so buffers can share `&GcHeap`; the heap
/// is therefore `!Sync` and must stay on the thread that owns it.
#[derive(Debug)]
pub struct GcHeap {
    config: HeapConfig,
    stats: Cell<HeapStats>,
    threshold: Cell<usize>,
    collection_due: Cell<bool>,
}

impl GcHeap {
    /// Create a heap from a validated config.
    pub fn new(config: HeapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            threshold: Cell::new(config.initial_threshold),
            config,
            stats: Cell::new(HeapStats::default()),
            collection_due: Cell::new(false),
        })
    }

    /// Create an unbounded heap with default thresholds.
    pub fn unbounded() -> Self {
        Self {
            threshold: Cell::new(HeapConfig::DEFAULT_INITIAL_THRESHOLD),
            config: HeapConfig::new(),
            stats: Cell::new(HeapStats::default()),
            collection_due: Cell::new(false),
        }
    }

    /// The config this heap was created with.
    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    /// Snapshot of the current accounting.
    pub fn stats(&self) -> HeapStats {
        self.stats.get()
    }

    /// Bytes currently held by live blocks.
    pub fn bytes_in_use(&self) -> usize {
        self.stats.get().bytes_in_use
    }

    /// Bytes in use at which the next collection becomes due.
    pub fn threshold(&self) -> usize {
        self.threshold.get()
    }

    /// Returns `true` once `bytes_in_use` has crossed the threshold and
    /// no collection has finished since.
    pub fn collection_due(&self) -> bool {
        self.collection_due.get()
    }

    /// Record that the owning runtime finished a collection.
    ///
    /// Clears the due flag and recomputes the threshold from the bytes
    /// still in use.
    pub fn collection_finished(&self) {
        let mut stats = self.stats.get();
        stats.collections += 1;
        self.stats.set(stats);
        let threshold = self.config.next_threshold(stats.bytes_in_use);
        self.threshold.set(threshold);
        self.collection_due.set(false);
        tracing::debug!(
            live_bytes = stats.bytes_in_use,
            threshold,
            "heap collection finished"
        );
    }

    /// Charge `delta` more bytes, or refuse if the limit would be exceeded.
    fn charge(&self, delta: usize) -> Result<(), HeapError> {
        let mut stats = self.stats.get();
        let in_use = stats.bytes_in_use;
        let new_in_use = in_use.checked_add(delta);
        let limit = self.config.memory_limit.unwrap_or(usize::MAX);
        let new_in_use = match new_in_use {
            Some(n) if n <= limit => n,
            _ => {
                stats.failed_requests += 1;
                self.stats.set(stats);
                tracing::warn!(
                    requested = delta,
                    in_use,
                    limit,
                    "heap request refused"
                );
                return Err(HeapError::OutOfMemory {
                    requested: delta,
                    in_use,
                    limit,
                });
            }
        };
        stats.bytes_in_use = new_in_use;
        stats.peak_bytes = stats.peak_bytes.max(new_in_use);
        self.stats.set(stats);

        if !self.collection_due.get() && new_in_use > self.threshold.get() {
            self.collection_due.set(true);
            tracing::debug!(
                in_use = new_in_use,
                threshold = self.threshold.get(),
                "heap collection due"
            );
        }
        Ok(())
    }

    fn credit(&self, delta: usize) {
        let mut stats = self.stats.get();
        debug_assert!(
            delta <= stats.bytes_in_use,
            "heap credited {delta} bytes with only {} in use",
            stats.bytes_in_use
        );
        stats.bytes_in_use = stats.bytes_in_use.saturating_sub(delta);
        self.stats.set(stats);
    }

    fn bump(&self, update: impl FnOnce(&mut HeapStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}

impl Default for GcHeap {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl Allocator for GcHeap {
    fn allocate(&self, size: usize) -> Result<Block, HeapError> {
        self.charge(size)?;
        self.bump(|s| s.allocations += 1);
        Ok(Block::zeroed(size))
    }

    fn reallocate(&self, block: &mut Block, new_size: usize) -> Result<(), HeapError> {
        let old_size = block.len();
        if new_size == old_size {
            return Ok(());
        }
        if new_size > old_size {
            self.charge(new_size - old_size)?;
        } else {
            self.credit(old_size - new_size);
        }
        block.resize_to(new_size);
        self.bump(|s| s.reallocations += 1);
        Ok(())
    }

    fn free(&self, block: Block) {
        self.credit(block.len());
        self.bump(|s| s.frees += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_charges_bytes() {
        let heap = GcHeap::unbounded();
        let block = heap.allocate(64).unwrap();
        assert_eq!(block.len(), 64);
        assert_eq!(heap.bytes_in_use(), 64);
        assert_eq!(heap.stats().allocations, 1);
    }

    #[test]
    fn free_returns_accounting_to_zero() {
        let heap = GcHeap::unbounded();
        let a = heap.allocate(10).unwrap();
        let b = heap.allocate(20).unwrap();
        heap.free(a);
        heap.free(b);
        let stats = heap.stats();
        assert_eq!(stats.bytes_in_use, 0);
        assert_eq!(stats.peak_bytes, 30);
        assert_eq!(stats.frees, 2);
        assert_eq!(stats.live_blocks(), 0);
    }

    #[test]
    fn reallocate_tracks_delta_both_ways() {
        let heap = GcHeap::unbounded();
        let mut block = heap.allocate(8).unwrap();
        heap.reallocate(&mut block, 32).unwrap();
        assert_eq!(heap.bytes_in_use(), 32);
        heap.reallocate(&mut block, 4).unwrap();
        assert_eq!(heap.bytes_in_use(), 4);
        assert_eq!(block.len(), 4);
        assert_eq!(heap.stats().reallocations, 2);
    }

    #[test]
    fn same_size_reallocate_is_not_counted() {
        let heap = GcHeap::unbounded();
        let mut block = heap.allocate(8).unwrap();
        heap.reallocate(&mut block, 8).unwrap();
        assert_eq!(heap.stats().reallocations, 0);
    }

    #[test]
    fn limit_refuses_allocation() {
        let heap = GcHeap::new(HeapConfig::with_limit(100)).unwrap();
        let _a = heap.allocate(80).unwrap();
        let err = heap.allocate(30).unwrap_err();
        assert_eq!(
            err,
            HeapError::OutOfMemory {
                requested: 30,
                in_use: 80,
                limit: 100,
            }
        );
        assert_eq!(heap.bytes_in_use(), 80);
        assert_eq!(heap.stats().failed_requests, 1);
    }

    #[test]
    fn failed_reallocate_leaves_block_untouched() {
        let heap = GcHeap::new(HeapConfig::with_limit(16)).unwrap();
        let mut block = heap.allocate(8).unwrap();
        block.as_mut_slice().fill(7);
        assert!(heap.reallocate(&mut block, 32).is_err());
        assert_eq!(block.len(), 8);
        assert!(block.as_slice().iter().all(|&b| b == 7));
        assert_eq!(heap.bytes_in_use(), 8);
    }

    #[test]
    fn shrinking_always_succeeds_at_limit() {
        let heap = GcHeap::new(HeapConfig::with_limit(16)).unwrap();
        let mut block = heap.allocate(16).unwrap();
        heap.reallocate(&mut block, 2).unwrap();
        assert_eq!(heap.bytes_in_use(), 2);
    }

    #[test]
    fn crossing_threshold_marks_collection_due() {
        let config = HeapConfig {
            initial_threshold: 100,
            ..HeapConfig::new()
        };
        let heap = GcHeap::new(config).unwrap();
        let a = heap.allocate(60).unwrap();
        assert!(!heap.collection_due());
        let _b = heap.allocate(60).unwrap();
        assert!(heap.collection_due());

        heap.free(a);
        heap.collection_finished();
        assert!(!heap.collection_due());
        // 60 live bytes * 200% = 120, above the initial threshold.
        assert_eq!(heap.threshold(), 120);
        assert_eq!(heap.stats().collections, 1);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = HeapConfig {
            threshold_ratio_percent: 10,
            ..HeapConfig::new()
        };
        assert!(GcHeap::new(config).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn bytes_in_use_matches_live_block_lengths(
                sizes in proptest::collection::vec(0usize..512, 1..20),
                regrow in proptest::collection::vec(0usize..512, 1..20),
            ) {
                let heap = GcHeap::unbounded();
                let mut blocks: Vec<Block> = sizes
                    .iter()
                    .map(|&s| heap.allocate(s).unwrap())
                    .collect();
                for (block, &new_size) in blocks.iter_mut().zip(regrow.iter()) {
                    heap.reallocate(block, new_size).unwrap();
                }
                let live: usize = blocks.iter().map(Block::len).sum();
                prop_assert_eq!(heap.bytes_in_use(), live);
                prop_assert!(heap.stats().peak_bytes >= live);

                for block in blocks {
                    heap.free(block);
                }
                prop_assert_eq!(heap.bytes_in_use(), 0);
            }

            #[test]
            fn never_exceeds_limit(
                limit in 1usize..4096,
                sizes in proptest::collection::vec(0usize..1024, 1..30),
            ) {
                let heap = GcHeap::new(HeapConfig::with_limit(limit)).unwrap();
                let mut held = Vec::new();
                for s in sizes {
                    if let Ok(block) = heap.allocate(s) {
                        held.push(block);
                    }
                    prop_assert!(heap.bytes_in_use() <= limit);
                }
            }
        }
    }
}
