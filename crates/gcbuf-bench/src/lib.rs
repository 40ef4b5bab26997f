//! Benchmark profiles and utilities for gcbuf.
//!
//! Provides workload shapes modelled on the buffers an interpreter keeps:
//!
//! - [`BufferProfile::value_stack`]: 16-byte tagged values, shallow depth
//! - [`BufferProfile::string_builder`]: 1-byte records, medium length
//! - [`BufferProfile::instruction_list`]: 4-byte opcodes, long programs
//!
//! and [`fill_buffer`] to drive a buffer through a profile.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::num::NonZeroUsize;

use gcbuf_heap::{Allocator, HeapError};
use gcbuf_vector::GrowableBuffer;

/// Shape of a buffer workload: record width and how many records to append.
#[derive(Clone, Copy, Debug)]
pub struct BufferProfile {
    pub name: &'static str,
    pub element_size: NonZeroUsize,
    pub records: usize,
}

impl BufferProfile {
    const fn new(name: &'static str, element_size: NonZeroUsize, records: usize) -> Self {
        Self {
            name,
            element_size,
            records,
        }
    }

    /// Interpreter value stack: 16-byte values, 24 deep.
    pub const fn value_stack() -> Self {
        Self::new("value_stack", NonZeroUsize::MIN.saturating_add(15), 24)
    }

    /// String builder: single bytes, 300 characters.
    pub const fn string_builder() -> Self {
        Self::new("string_builder", NonZeroUsize::MIN, 300)
    }

    /// Compiled function body: 4-byte instructions, 5000 long.
    pub const fn instruction_list() -> Self {
        Self::new("instruction_list", NonZeroUsize::MIN.saturating_add(3), 5000)
    }

    /// All profiles, smallest first.
    pub fn all() -> [Self; 3] {
        [
            Self::value_stack(),
            Self::string_builder(),
            Self::instruction_list(),
        ]
    }
}

/// Create a buffer for `profile` and append every record.
///
/// Record `i` is filled with the low byte of `i`.
pub fn fill_buffer<'h, A: Allocator + ?Sized>(
    allocator: &'h A,
    profile: BufferProfile,
) -> Result<GrowableBuffer<'h, A>, HeapError> {
    let mut buffer = GrowableBuffer::new(allocator, profile.element_size)?;
    let mut record = vec![0u8; profile.element_size.get()];
    for i in 0..profile.records {
        record.fill(i as u8);
        buffer.append(Some(&record))?;
    }
    Ok(buffer)
}
