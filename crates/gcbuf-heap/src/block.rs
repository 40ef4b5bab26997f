//! Owned storage regions handed out by allocators.
//!
//! A [`Block`] is a contiguous, zero-initialised byte region with a fixed
//! length. Its length is the size the allocator accounted for it, so
//! reallocation and freeing never need the caller to pass an old size.

/// An owned, contiguous byte region obtained from an [`Allocator`](crate::Allocator).
///
/// Blocks are created zero-filled. Resizing preserves the common prefix
/// and zero-fills any growth. Dropping a block without handing it back to
/// its allocator releases the memory but leaves the allocator's accounting
/// untouched, so owners should return blocks through
/// [`Allocator::free`](crate::Allocator::free).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    bytes: Box<[u8]>,
}

impl Block {
    /// Create a zero-filled block of `len` bytes.
    ///
    /// Intended for [`Allocator`](crate::Allocator) implementations; buffer
    /// code should obtain blocks through an allocator so they are accounted.
    pub fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len].into_boxed_slice(),
        }
    }

    /// Change the length of the block to `new_len` bytes.
    ///
    /// Bytes in `0..min(old, new)` are preserved; bytes past the old
    /// length are zero. The region may move.
    pub fn resize_to(&mut self, new_len: usize) {
        if new_len == self.bytes.len() {
            return;
        }
        let mut bytes = std::mem::take(&mut self.bytes).into_vec();
        bytes.resize(new_len, 0);
        self.bytes = bytes.into_boxed_slice();
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for a zero-length block.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Shared view of the whole region.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable view of the whole region.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Consume the block, returning the underlying bytes.
    pub fn into_boxed_slice(self) -> Box<[u8]> {
        self.bytes
    }
}

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for Block {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_block_is_all_zero() {
        let block = Block::zeroed(16);
        assert_eq!(block.len(), 16);
        assert!(block.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn default_block_is_empty() {
        let block = Block::default();
        assert!(block.is_empty());
        assert_eq!(block.len(), 0);
    }

    #[test]
    fn grow_preserves_prefix_and_zero_fills() {
        let mut block = Block::zeroed(4);
        block.as_mut_slice().copy_from_slice(&[1, 2, 3, 4]);
        block.resize_to(8);
        assert_eq!(block.as_slice(), &[1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn shrink_keeps_prefix() {
        let mut block = Block::zeroed(6);
        block.as_mut_slice().copy_from_slice(&[9, 8, 7, 6, 5, 4]);
        block.resize_to(3);
        assert_eq!(block.as_slice(), &[9, 8, 7]);
    }

    #[test]
    fn resize_to_zero_then_regrow() {
        let mut block = Block::zeroed(3);
        block.as_mut_slice().fill(0xff);
        block.resize_to(0);
        assert!(block.is_empty());
        block.resize_to(2);
        assert_eq!(block.as_slice(), &[0, 0]);
    }
}
