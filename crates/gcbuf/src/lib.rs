//! gcbuf: growable byte-record buffers with collector-accounted storage.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the gcbuf sub-crates. For most users, adding `gcbuf` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gcbuf::prelude::*;
//! use std::num::NonZeroUsize;
//!
//! let heap = GcHeap::new(HeapConfig::default()).unwrap();
//! let mut stack = GrowableBuffer::new(&heap, NonZeroUsize::new(8).unwrap()).unwrap();
//!
//! for value in 0u64..5 {
//!     stack.append(Some(&value.to_le_bytes())).unwrap();
//! }
//! assert_eq!(stack.count(), 5);
//! assert_eq!(stack.capacity(), 6);
//! assert_eq!(stack.at(3), &3u64.to_le_bytes());
//!
//! // Hand the exactly-sized storage to the caller.
//! let block = stack.release().unwrap().unwrap();
//! assert_eq!(block.len(), 40);
//! heap.free(block);
//! assert_eq!(heap.bytes_in_use(), 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`heap`] | `gcbuf-heap` | `Allocator`, `Block`, `GcHeap`, `HeapConfig`, `HeapStats` |
//! | [`vector`] | `gcbuf-vector` | `GrowableBuffer`, `next_size`, growth tiers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Allocator contract, storage blocks and the accounting heap (`gcbuf-heap`).
///
/// Implement [`heap::Allocator`] to route buffer storage through a
/// different collector; [`heap::GcHeap`] is the stock implementation.
pub use gcbuf_heap as heap;

/// Growable buffer and growth schedule (`gcbuf-vector`).
pub use gcbuf_vector as vector;

/// Common imports for typical gcbuf usage.
///
/// ```rust
/// use gcbuf::prelude::*;
/// ```
pub mod prelude {
    // Heap
    pub use gcbuf_heap::{Allocator, Block, GcHeap, HeapConfig, HeapStats};

    // Buffer
    pub use gcbuf_vector::{next_size, GrowableBuffer};

    // Errors
    pub use gcbuf_heap::{ConfigError, HeapError};
    pub use gcbuf_vector::VectorError;
}
