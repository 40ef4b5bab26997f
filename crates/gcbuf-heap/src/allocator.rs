//! The sized allocation contract consumed by buffer code.

use crate::block::Block;
use crate::error::HeapError;

/// Sized allocate / reallocate / free with byte-accurate accounting.
///
/// Implementors own all memory bookkeeping: every byte held by a live
/// [`Block`] they handed out must be reflected in their accounting, and
/// [`free`](Allocator::free) must remove exactly `block.len()` bytes.
/// Methods take `&self` so many buffers can borrow one allocator at once;
/// implementations use interior mutability for their counters.
pub trait Allocator {
    /// Allocate a zero-filled block of `size` bytes.
    fn allocate(&self, size: usize) -> Result<Block, HeapError>;

    /// Resize `block` from `block.len()` to `new_size` bytes.
    ///
    /// The common prefix is preserved and growth is zero-filled. On error
    /// the block and the accounting are left exactly as they were.
    fn reallocate(&self, block: &mut Block, new_size: usize) -> Result<(), HeapError>;

    /// Release `block` and remove its length from accounting.
    fn free(&self, block: Block);
}

impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate(&self, size: usize) -> Result<Block, HeapError> {
        (**self).allocate(size)
    }

    fn reallocate(&self, block: &mut Block, new_size: usize) -> Result<(), HeapError> {
        (**self).reallocate(block, new_size)
    }

    fn free(&self, block: Block) {
        (**self).free(block)
    }
}

/// Byte size of `elements` records of `element_size` bytes each.
///
/// Returns [`HeapError::SizeOverflow`] instead of wrapping.
pub fn byte_size(elements: usize, element_size: usize) -> Result<usize, HeapError> {
    elements
        .checked_mul(element_size)
        .ok_or(HeapError::SizeOverflow {
            elements,
            element_size,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_size_multiplies() {
        assert_eq!(byte_size(4, 8), Ok(32));
        assert_eq!(byte_size(0, 8), Ok(0));
    }

    #[test]
    fn byte_size_overflow_is_error() {
        assert_eq!(
            byte_size(usize::MAX, 2),
            Err(HeapError::SizeOverflow {
                elements: usize::MAX,
                element_size: 2,
            })
        );
    }
}
