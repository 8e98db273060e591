//! Error types for Burrows operations.
//!
//! A single error type covers every failure the pipeline can surface:
//! I/O errors from the underlying source or sink, bit-level underflow,
//! out-of-range indices, lifecycle misuse of a bit writer, and malformed
//! encoded data.

use std::io;
use thiserror::Error;

/// The main error type for Burrows operations.
#[derive(Debug, Error)]
pub enum BurrowsError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// More bits were requested than remain and no more can be sourced.
    #[error("Failed to read {requested} bits: only {available} available")]
    Underflow {
        /// Number of bits requested.
        requested: usize,
        /// Number of bits that were available.
        available: usize,
    },

    /// An index argument lies outside its valid range.
    #[error("Requested index {index} is out of bounds (length {len})")]
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// Length of the indexed structure.
        len: usize,
    },

    /// `close()` was called on a bit writer that is already closed.
    #[error("Cannot close already-closed bit writer")]
    AlreadyClosed,

    /// A serialized Huffman trie is not a well-formed binary trie.
    #[error("Malformed Huffman trie: {message}")]
    MalformedTrie {
        /// Description of the inconsistency.
        message: String,
    },

    /// A mode argument other than `-` or `+`.
    #[error("Expected \"-\" (forward) or \"+\" (inverse), got {argument:?}")]
    InvalidMode {
        /// The argument that was given.
        argument: String,
    },

    /// A bit width outside `1..=8`.
    #[error("Expected bit count in range 1..8 but got {count}")]
    InvalidBitCount {
        /// The requested bit count.
        count: u8,
    },

    /// A value that does not fit in the requested number of bits.
    #[error("Value {value} too large for {bits} bits")]
    ValueTooWide {
        /// The value being written.
        value: u8,
        /// The requested bit count.
        bits: u8,
    },

    /// A fixed-capacity bit buffer cannot accept more bits.
    #[error("Capacity exceeded (capacity={capacity}, size={size}, pushing={requested})")]
    CapacityExceeded {
        /// Capacity in bits.
        capacity: usize,
        /// Bits currently held.
        size: usize,
        /// Bits being pushed.
        requested: usize,
    },

    /// Input whose length does not fit in the 32-bit length fields.
    #[error("Input of {len} bytes exceeds the 32-bit length limit")]
    InputTooLarge {
        /// Length of the rejected input.
        len: usize,
    },

    /// Structurally invalid encoded data.
    #[error("Corrupted data: {message}")]
    Corrupted {
        /// Description of the corruption.
        message: String,
    },
}

/// Result type alias for Burrows operations.
pub type Result<T> = std::result::Result<T, BurrowsError>;

impl BurrowsError {
    /// Create an underflow error.
    pub fn underflow(requested: usize, available: usize) -> Self {
        Self::Underflow {
            requested,
            available,
        }
    }

    /// Create an out-of-bounds error.
    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::OutOfBounds { index, len }
    }

    /// Create a malformed trie error.
    pub fn malformed_trie(message: impl Into<String>) -> Self {
        Self::MalformedTrie {
            message: message.into(),
        }
    }

    /// Create an invalid mode error.
    pub fn invalid_mode(argument: impl Into<String>) -> Self {
        Self::InvalidMode {
            argument: argument.into(),
        }
    }

    /// Create an invalid bit count error.
    pub fn invalid_bit_count(count: u8) -> Self {
        Self::InvalidBitCount { count }
    }

    /// Create a value too wide error.
    pub fn value_too_wide(value: u8, bits: u8) -> Self {
        Self::ValueTooWide { value, bits }
    }

    /// Create a capacity exceeded error.
    pub fn capacity_exceeded(capacity: usize, size: usize, requested: usize) -> Self {
        Self::CapacityExceeded {
            capacity,
            size,
            requested,
        }
    }

    /// Create an input too large error.
    pub fn input_too_large(len: usize) -> Self {
        Self::InputTooLarge { len }
    }

    /// Create a corrupted data error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted {
            message: message.into(),
        }
    }

    /// Whether this error means the input ran out of bits.
    pub fn is_underflow(&self) -> bool {
        matches!(self, Self::Underflow { .. })
    }
}

/// Check that `bits` is a valid width for a single bit-level operation.
pub(crate) fn check_bit_count(bits: u8) -> Result<()> {
    if (1..=8).contains(&bits) {
        Ok(())
    } else {
        Err(BurrowsError::invalid_bit_count(bits))
    }
}

/// Convert a length to the `u32` used by the wire formats.
pub fn checked_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| BurrowsError::input_too_large(len))
}
