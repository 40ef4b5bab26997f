//! Heap accounting snapshots.

/// Point-in-time accounting data for a [`GcHeap`](crate::GcHeap).
///
/// Byte counts reflect the lengths of live blocks. Counters are
/// cumulative since the heap was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Bytes currently held by live blocks.
    pub bytes_in_use: usize,
    /// Highest `bytes_in_use` observed.
    pub peak_bytes: usize,
    /// Successful `allocate` calls.
    pub allocations: u64,
    /// Successful `reallocate` calls that changed a block's size.
    pub reallocations: u64,
    /// `free` calls.
    pub frees: u64,
    /// Requests refused with an error.
    pub failed_requests: u64,
    /// Collections reported finished via `collection_finished`.
    pub collections: u64,
}

impl HeapStats {
    /// Number of blocks handed out and not yet freed.
    ///
    /// Blocks released by buffers and not returned are still counted.
    pub fn live_blocks(&self) -> u64 {
        self.allocations.saturating_sub(self.frees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let s = HeapStats::default();
        assert_eq!(s.bytes_in_use, 0);
        assert_eq!(s.peak_bytes, 0);
        assert_eq!(s.live_blocks(), 0);
    }

    #[test]
    fn live_blocks_is_allocations_minus_frees() {
        let s = HeapStats {
            allocations: 5,
            frees: 2,
            ..HeapStats::default()
        };
        assert_eq!(s.live_blocks(), 3);
    }
}
