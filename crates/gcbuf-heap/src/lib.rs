//! Collector-accounting allocation for gcbuf.
//!
//! Provides the sized allocation contract ([`Allocator`]) that growable
//! buffers are written against, the owned storage region it hands out
//! ([`Block`]), and a concrete single-threaded heap ([`GcHeap`]) that
//! keeps byte-accurate accounting for a garbage collector.
//!
//! # Architecture
//!
//! ```text
//! GcHeap (accounting + limit + collection threshold)
//! ├── HeapConfig (limit, initial threshold, ratio)
//! ├── HeapStats (in use, peak, call counters)
//! └── Block × N (owned zero-filled Box<[u8]>, length == accounted size)
//! ```
//!
//! Nothing here uses `unsafe`: blocks are ordinary boxed slices, and the
//! accounting is a pure function of their lengths.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod block;
pub mod config;
pub mod error;
pub mod heap;
pub mod stats;

// Public re-exports for the primary API surface.
pub use allocator::{byte_size, Allocator};
pub use block::Block;
pub use config::HeapConfig;
pub use error::{ConfigError, HeapError};
pub use heap::GcHeap;
pub use stats::HeapStats;
