//! Test utilities and mock allocators for gcbuf development.
//!
//! Provides [`Allocator`] implementations that make buffer behaviour
//! observable in tests:
//!
//! - [`RecordingAllocator`] — logs every call as an [`AllocEvent`].
//! - [`FailingAllocator`] — succeeds a fixed number of times, then
//!   refuses every growing request.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::{Cell, RefCell};

use gcbuf_heap::{Allocator, Block, HeapError};

/// One call observed by a [`RecordingAllocator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocEvent {
    Allocate { size: usize },
    Reallocate { old_size: usize, new_size: usize },
    Free { size: usize },
}

/// Allocator that records every call it receives.
///
/// Tracks bytes in use the same way a real heap would, so tests can
/// assert both the call sequence and the final accounting.
#[derive(Debug, Default)]
pub struct RecordingAllocator {
    events: RefCell<Vec<AllocEvent>>,
    in_use: Cell<usize>,
}

impl RecordingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far, oldest first.
    pub fn events(&self) -> Vec<AllocEvent> {
        self.events.borrow().clone()
    }

    /// Number of reallocate calls recorded.
    pub fn reallocations(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, AllocEvent::Reallocate { .. }))
            .count()
    }

    /// Forget recorded events, keeping the byte count.
    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn bytes_in_use(&self) -> usize {
        self.in_use.get()
    }
}

impl Allocator for RecordingAllocator {
    fn allocate(&self, size: usize) -> Result<Block, HeapError> {
        self.events.borrow_mut().push(AllocEvent::Allocate { size });
        self.in_use.set(self.in_use.get() + size);
        Ok(Block::zeroed(size))
    }

    fn reallocate(&self, block: &mut Block, new_size: usize) -> Result<(), HeapError> {
        let old_size = block.len();
        self.events.borrow_mut().push(AllocEvent::Reallocate { old_size, new_size });
        self.in_use.set(self.in_use.get() - old_size + new_size);
        block.resize_to(new_size);
        Ok(())
    }

    fn free(&self, block: Block) {
        let size = block.len();
        self.events.borrow_mut().push(AllocEvent::Free { size });
        self.in_use.set(self.in_use.get() - size);
    }
}

/// Allocator that refuses growing requests after `budget` successes.
///
/// Shrinking reallocations and frees always succeed, matching a real heap
/// that is out of memory but can still give memory back.
#[derive(Debug)]
pub struct FailingAllocator {
    remaining: Cell<usize>,
    in_use: Cell<usize>,
}

impl FailingAllocator {
    pub fn new(budget: usize) -> Self {
        Self {
            remaining: Cell::new(budget),
            in_use: Cell::new(0),
        }
    }

    pub fn bytes_in_use(&self) -> usize {
        self.in_use.get()
    }

    fn take(&self, requested: usize) -> Result<(), HeapError> {
        match self.remaining.get() {
            0 => Err(HeapError::OutOfMemory {
                requested,
                in_use: self.in_use.get(),
                limit: self.in_use.get(),
            }),
            n => {
                self.remaining.set(n - 1);
                Ok(())
            }
        }
    }
}

impl Allocator for FailingAllocator {
    fn allocate(&self, size: usize) -> Result<Block, HeapError> {
        self.take(size)?;
        self.in_use.set(self.in_use.get() + size);
        Ok(Block::zeroed(size))
    }

    fn reallocate(&self, block: &mut Block, new_size: usize) -> Result<(), HeapError> {
        let old_size = block.len();
        if new_size > old_size {
            self.take(new_size - old_size)?;
        }
        self.in_use.set(self.in_use.get() - old_size + new_size);
        block.resize_to(new_size);
        Ok(())
    }

    fn free(&self, block: Block) {
        self.in_use.set(self.in_use.get() - block.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_allocator_logs_in_order() {
        let alloc = RecordingAllocator::new();
        let mut block = alloc.allocate(4).unwrap();
        alloc.reallocate(&mut block, 8).unwrap();
        alloc.free(block);
        assert_eq!(
            alloc.events(),
            vec![
                AllocEvent::Allocate { size: 4 },
                AllocEvent::Reallocate {
                    old_size: 4,
                    new_size: 8
                },
                AllocEvent::Free { size: 8 },
            ]
        );
        assert_eq!(alloc.bytes_in_use(), 0);
    }

    #[test]
    fn failing_allocator_exhausts_budget() {
        let alloc = FailingAllocator::new(1);
        let mut block = alloc.allocate(4).unwrap();
        assert!(alloc.reallocate(&mut block, 8).is_err());
        // Shrinking still works with no budget left.
        alloc.reallocate(&mut block, 2).unwrap();
        alloc.free(block);
        assert_eq!(alloc.bytes_in_use(), 0);
    }
}
