//! The full compression pipeline.
//!
//! ```text
//! compress:   bytes -> BWT -> MTF -> Huffman -> compressed
//! decompress: compressed -> Huffman -> MTF -> BWT -> bytes
//! ```
//!
//! Stages are connected through in-memory buffers; each stage can still be
//! run on its own through its [`Codec`] implementation.

use crate::bwt::BurrowsWheeler;
use crate::huffman::Huffman;
use crate::mtf::MoveToFront;
use burrows_core::bitstream::{BitRead, BitWrite};
use burrows_core::error::Result;
use burrows_core::traits::Codec;
use log::info;

/// Compress data with BWT, MTF and Huffman coding.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let transformed = BurrowsWheeler.encode_bytes(data)?;
    let ranked = MoveToFront.encode_bytes(&transformed)?;
    let compressed = Huffman.encode_bytes(&ranked)?;

    info!(
        "pipeline: compressed {} bytes to {} bytes",
        data.len(),
        compressed.len()
    );
    Ok(compressed)
}

/// Decompress data produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let ranked = Huffman.decode_bytes(data)?;
    let transformed = MoveToFront.decode_bytes(&ranked)?;
    let restored = BurrowsWheeler.decode_bytes(&transformed)?;

    info!(
        "pipeline: decompressed {} bytes to {} bytes",
        data.len(),
        restored.len()
    );
    Ok(restored)
}

/// All three stages as a single codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline;

impl Codec for Pipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn encode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()> {
        let data = input.read_to_end()?;
        output.write_bytes(&compress(&data)?)?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()> {
        let data = input.read_to_end()?;
        output.write_bytes(&decompress(&data)?)?;
        Ok(())
    }
}
