//! Vector-specific error types.

use std::error::Error;
use std::fmt;

use gcbuf_heap::HeapError;

/// Errors returned by the checked buffer operations.
///
/// The unchecked operations (`at`, `remove_end`, `append`) treat these
/// conditions as caller bugs and only assert on them in debug builds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VectorError {
    /// Element size of zero passed to a constructor.
    ZeroElementSize,
    /// `try_remove_end` called on an empty buffer.
    Underflow,
    /// A record's length does not match the buffer's element size.
    RecordSize {
        /// The buffer's element size.
        expected: usize,
        /// Length of the record supplied.
        actual: usize,
    },
    /// The allocator refused a request.
    Heap(HeapError),
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroElementSize => write!(f, "element size must be at least 1 byte"),
            Self::Underflow => write!(f, "cannot remove from an empty buffer"),
            Self::RecordSize { expected, actual } => {
                write!(f, "record is {actual} bytes, element size is {expected}")
            }
            Self::Heap(e) => write!(f, "heap: {e}"),
        }
    }
}

impl Error for VectorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Heap(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HeapError> for VectorError {
    fn from(e: HeapError) -> Self {
        Self::Heap(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_error_is_source() {
        let err = VectorError::from(HeapError::SizeOverflow {
            elements: 3,
            element_size: 4,
        });
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("heap: size overflow"));
    }

    #[test]
    fn record_size_message() {
        let err = VectorError::RecordSize {
            expected: 8,
            actual: 3,
        };
        assert_eq!(err.to_string(), "record is 3 bytes, element size is 8");
    }
}
