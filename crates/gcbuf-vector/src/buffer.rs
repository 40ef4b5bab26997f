//! The element-size-agnostic growable buffer.
//!
//! A [`GrowableBuffer`] stores fixed-size byte records in one contiguous
//! [`Block`] obtained from an [`Allocator`]. Capacity grows through
//! [`next_size`], and every byte of storage is accounted by the allocator
//! the buffer borrows, from construction through growth to release.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::slice::ChunksExact;

use gcbuf_heap::{byte_size, Allocator, Block, HeapError};

use crate::error::VectorError;
use crate::growth::next_size;

/// Growable array of fixed-size byte records.
///
/// Records are opaque: they are copied in and out by value and never
/// constructed or destroyed. Slices returned by [`at`](Self::at) borrow the
/// buffer, so they cannot survive a call that might move the storage.
///
/// Invariants: `count <= capacity`; storage is `Some` with exactly
/// `capacity * element_size` bytes whenever `capacity > 0`, and `None`
/// otherwise.
pub struct GrowableBuffer<'h, A: Allocator + ?Sized> {
    allocator: &'h A,
    element_size: NonZeroUsize,
    capacity: usize,
    count: usize,
    storage: Option<Block>,
}

impl<'h, A: Allocator + ?Sized> GrowableBuffer<'h, A> {
    /// Capacity allocated by [`new`](Self::new).
    pub const INITIAL_CAPACITY: usize = 2;

    /// Create an empty buffer with room for [`INITIAL_CAPACITY`](Self::INITIAL_CAPACITY) records.
    pub fn new(allocator: &'h A, element_size: NonZeroUsize) -> Result<Self, HeapError> {
        Self::with_capacity(allocator, element_size, Self::INITIAL_CAPACITY)
    }

    /// Create an empty buffer with room for exactly `capacity` records.
    ///
    /// A capacity of zero allocates nothing; the first append then
    /// allocates the first growth tier.
    pub fn with_capacity(
        allocator: &'h A,
        element_size: NonZeroUsize,
        capacity: usize,
    ) -> Result<Self, HeapError> {
        let storage = if capacity == 0 {
            None
        } else {
            Some(allocator.allocate(byte_size(capacity, element_size.get())?)?)
        };
        Ok(Self {
            allocator,
            element_size,
            capacity,
            count: 0,
            storage,
        })
    }

    /// Like [`new`](Self::new), but takes an unchecked element size.
    pub fn from_raw_size(allocator: &'h A, element_size: usize) -> Result<Self, VectorError> {
        let element_size = NonZeroUsize::new(element_size).ok_or(VectorError::ZeroElementSize)?;
        Ok(Self::new(allocator, element_size)?)
    }

    /// Free the storage. Equivalent to dropping the buffer.
    pub fn destroy(self) {
        drop(self);
    }

    /// Number of valid records.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` when no records are valid, regardless of capacity.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of records the storage holds without reallocating.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes per record.
    pub fn element_size(&self) -> usize {
        self.element_size.get()
    }

    /// Bytes of storage currently accounted to this buffer.
    pub fn memory_bytes(&self) -> usize {
        self.storage.as_ref().map_or(0, Block::len)
    }

    /// The record at `index`.
    ///
    /// Indices past `count` but inside capacity are not rejected in
    /// release builds (the slot holds whatever bytes it last held).
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`, and in debug builds if `index >= count`.
    pub fn at(&self, index: usize) -> &[u8] {
        debug_assert!(
            index < self.count,
            "index {index} out of range for buffer of {} records",
            self.count
        );
        let range = self.slot(index);
        &self.bytes()[range]
    }

    /// Mutable access to the record at `index`. Same contract as [`at`](Self::at).
    pub fn at_mut(&mut self, index: usize) -> &mut [u8] {
        debug_assert!(
            index < self.count,
            "index {index} out of range for buffer of {} records",
            self.count
        );
        let range = self.slot(index);
        &mut self.bytes_mut()[range]
    }

    /// The record at `index`, or `None` if `index >= count`.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        (index < self.count).then(|| &self.bytes()[self.slot(index)])
    }

    /// Mutable record at `index`, or `None` if `index >= count`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        if index >= self.count {
            return None;
        }
        let range = self.slot(index);
        Some(&mut self.bytes_mut()[range])
    }

    /// The last valid record.
    pub fn last(&self) -> Option<&[u8]> {
        self.count.checked_sub(1).and_then(|i| self.get(i))
    }

    /// All valid records as one contiguous byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes()[..self.count * self.element_size.get()]
    }

    /// Iterator over the valid records in order.
    pub fn records(&self) -> ChunksExact<'_, u8> {
        self.as_bytes().chunks_exact(self.element_size.get())
    }

    /// Append one record.
    ///
    /// Grows to `next_size(capacity)` when full. With `Some(record)` the
    /// bytes are copied into the new last slot; with `None` the slot keeps
    /// whatever it holds (zero for storage fresh from the allocator) and
    /// the caller is expected to fill it through [`at_mut`](Self::at_mut).
    ///
    /// On allocator failure the buffer is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `record.len()` differs from the element size.
    pub fn append(&mut self, record: Option<&[u8]>) -> Result<(), HeapError> {
        if self.count == self.capacity {
            self.reallocate(next_size(self.capacity))?;
        }
        let index = self.count;
        if let Some(record) = record {
            let range = self.slot(index);
            self.bytes_mut()[range].copy_from_slice(record);
        }
        self.count += 1;
        Ok(())
    }

    /// Append a record after checking its length.
    pub fn try_append(&mut self, record: &[u8]) -> Result<(), VectorError> {
        if record.len() != self.element_size.get() {
            return Err(VectorError::RecordSize {
                expected: self.element_size.get(),
                actual: record.len(),
            });
        }
        Ok(self.append(Some(record))?)
    }

    /// Drop the last record. Capacity is unchanged.
    ///
    /// The buffer must not be empty; only debug builds check this. Use
    /// [`try_remove_end`](Self::try_remove_end) when emptiness is not
    /// already known.
    pub fn remove_end(&mut self) {
        debug_assert!(self.count > 0, "remove_end on empty buffer");
        self.count -= 1;
    }

    /// Drop the last record, or report [`VectorError::Underflow`].
    pub fn try_remove_end(&mut self) -> Result<(), VectorError> {
        if self.count == 0 {
            return Err(VectorError::Underflow);
        }
        self.count -= 1;
        Ok(())
    }

    /// Set the record count to `new_count`.
    ///
    /// Grows capacity to `next_size(new_count)` when that exceeds the
    /// current capacity; never shrinks it. Records exposed by growing the
    /// count hold whatever bytes their slots last held.
    pub fn resize(&mut self, new_count: usize) -> Result<(), HeapError> {
        if new_count == self.count {
            return Ok(());
        }
        let new_capacity = next_size(new_count);
        if new_capacity > self.capacity {
            self.reallocate(new_capacity)?;
        }
        self.count = new_count;
        Ok(())
    }

    /// Forget all records, keeping capacity and storage.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Shrink storage to fit and hand it to the caller.
    ///
    /// Returns `None` (after freeing the storage) when the buffer is
    /// empty, otherwise a block of exactly `count * element_size` bytes.
    /// The caller owns the block and must return it to the allocator with
    /// [`Allocator::free`]. If the shrinking reallocation fails the buffer
    /// is dropped, which frees its storage.
    pub fn release(mut self) -> Result<Option<Block>, HeapError> {
        let Some(mut block) = self.storage.take() else {
            return Ok(None);
        };
        if self.count == 0 {
            self.allocator.free(block);
            self.capacity = 0;
            tracing::trace!(
                element_size = self.element_size.get(),
                "released empty buffer"
            );
            return Ok(None);
        }
        if self.count < self.capacity {
            let exact = byte_size(self.count, self.element_size.get())?;
            if let Err(e) = self.allocator.reallocate(&mut block, exact) {
                self.storage = Some(block);
                return Err(e);
            }
            self.capacity = self.count;
        }
        tracing::trace!(
            count = self.count,
            element_size = self.element_size.get(),
            "released buffer storage"
        );
        Ok(Some(block))
    }

    fn reallocate(&mut self, new_capacity: usize) -> Result<(), HeapError> {
        let new_size = byte_size(new_capacity, self.element_size.get())?;
        if let Some(block) = self.storage.as_mut() {
            self.allocator.reallocate(block, new_size)?;
        } else {
            self.storage = Some(self.allocator.allocate(new_size)?);
        }
        tracing::trace!(
            old_capacity = self.capacity,
            new_capacity,
            element_size = self.element_size.get(),
            "buffer storage resized"
        );
        self.capacity = new_capacity;
        Ok(())
    }

    fn slot(&self, index: usize) -> Range<usize> {
        let size = self.element_size.get();
        let start = index * size;
        start..start + size
    }

    fn bytes(&self) -> &[u8] {
        match self.storage.as_ref() {
            Some(block) => block.as_slice(),
            None => &[],
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        match self.storage.as_mut() {
            Some(block) => block.as_mut_slice(),
            None => &mut [],
        }
    }
}

impl<A: Allocator + ?Sized> Drop for GrowableBuffer<'_, A> {
    fn drop(&mut self) {
        if let Some(block) = self.storage.take() {
            self.allocator.free(block);
        }
    }
}

impl<A: Allocator + ?Sized> fmt::Debug for GrowableBuffer<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableBuffer")
            .field("element_size", &self.element_size)
            .field("count", &self.count)
            .field("capacity", &self.capacity)
            .finish()
    }
}
