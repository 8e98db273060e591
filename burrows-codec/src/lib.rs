//! Burrows-Wheeler compression stages.
//!
//! This crate provides the three reversible stages of the Burrows
//! pipeline, each usable on its own through the [`Codec`] trait:
//!
//! 1. Burrows-Wheeler Transform (BWT) - sorts the rotations of the input
//!    with a circular suffix array so equal contexts cluster together
//! 2. Move-to-Front Transform (MTF) - turns those clusters into runs of
//!    small values
//! 3. Huffman Coding - entropy codes the result with a serialized trie
//!
//! [`pipeline`] chains them.
//!
//! ## Example
//!
//! ```rust
//! use burrows_codec::{compress, decompress};
//!
//! let compressed = compress(b"ABRACADABRA!").unwrap();
//! assert_eq!(decompress(&compressed).unwrap(), b"ABRACADABRA!");
//! ```
//!
//! [`Codec`]: burrows_core::Codec

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Burrows-Wheeler Transform implementation.
pub mod bwt;
pub mod csa;
pub mod heap;
pub mod huffman;
pub mod mtf;
pub mod pipeline;

pub use bwt::{BurrowsWheeler, Transformed};
pub use csa::CircularSuffixArray;
pub use heap::MinPq;
pub use huffman::{CodeTable, Huffman, SymbolStats, Trie};
pub use mtf::{MoveToFront, MtfTable};
pub use pipeline::{Pipeline, compress, decompress};
