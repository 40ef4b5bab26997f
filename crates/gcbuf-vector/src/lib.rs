//! Growable byte-record buffers for managed runtimes.
//!
//! [`GrowableBuffer`] is the storage primitive a runtime builds its
//! internal stacks, string builders and instruction lists on. Records are
//! fixed-size opaque byte strings whose size is chosen at runtime, and all
//! storage comes from an [`Allocator`](gcbuf_heap::Allocator) so a
//! collector sees every byte.
//!
//! Capacity follows [`growth::next_size`]: a fixed tier table below 1024
//! records, power-of-two rounding above it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod growth;

pub use buffer::GrowableBuffer;
pub use error::VectorError;
pub use growth::{next_size, GROWTH_TIERS, TIER_LIMIT};
