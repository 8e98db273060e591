//! # Burrows Core
//!
//! Core components for the Burrows compression pipeline.
//!
//! This crate provides the fundamental building blocks shared by every stage:
//!
//! - [`bitstream`]: Bit-level I/O (live reader, in-memory source, writer)
//! - [`ringbuffer`]: Fixed-capacity FIFO of bits backing the in-memory source
//! - [`traits`]: The [`Codec`] stage trait and the `-`/`+` [`Direction`]
//! - [`hexdump`]: Hex dump of a byte stream for inspecting stage output
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     burrows bwt|mtf|huffman|pipeline -|+                │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Suffix sorting, BWT, Move-to-Front, Huffman         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitSource/BitWriter, BitRingBuffer        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use burrows_core::bitstream::{BitRead, BitReader};
//! use std::io::Cursor;
//!
//! let mut reader = BitReader::new(Cursor::new(vec![0xAB, 0xCD]));
//! assert_eq!(reader.read_bits(4).unwrap(), 0xA);
//! assert_eq!(reader.read_bits(8).unwrap(), 0xBC);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod hexdump;
pub mod ringbuffer;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitRead, BitReader, BitSource, BitWrite, BitWriter};
pub use error::{BurrowsError, Result};
pub use ringbuffer::BitRingBuffer;
pub use traits::{Codec, Direction};

/// Alphabet size: one symbol per byte value.
pub const RADIX: usize = 256;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::RADIX;
    pub use crate::bitstream::{BitRead, BitReader, BitSource, BitWrite, BitWriter};
    pub use crate::error::{BurrowsError, Result};
    pub use crate::traits::{Codec, Direction};
}
