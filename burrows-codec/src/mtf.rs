//! Move-to-Front Transform.
//!
//! MTF replaces each byte with its position in a recency-ordered table of
//! all 256 byte values, then moves that byte to the front of the table.
//! After a BWT, runs of equal bytes become runs of zeros.
//!
//! Both directions cost `O(R)` per byte in the worst case and `O(n + R)`
//! memory.

use burrows_core::RADIX;
use burrows_core::bitstream::{BitRead, BitWrite};
use burrows_core::error::Result;
use burrows_core::traits::Codec;
use log::debug;

/// Recency-ordered permutation of the byte values.
#[derive(Debug, Clone)]
pub struct MtfTable {
    symbols: [u8; RADIX],
}

impl Default for MtfTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MtfTable {
    /// Identity table: position `i` holds byte `i`.
    pub fn new() -> Self {
        let mut symbols = [0u8; RADIX];
        for (i, slot) in symbols.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self { symbols }
    }

    /// Current order of the table.
    pub fn symbols(&self) -> &[u8; RADIX] {
        &self.symbols
    }

    /// Return the current position of `byte` and move it to the front.
    pub fn encode(&mut self, byte: u8) -> u8 {
        let mut pos = 0;
        while self.symbols[pos] != byte {
            pos += 1;
        }
        self.move_to_front(pos);
        pos as u8
    }

    /// Return the byte at position `code` and move it to the front.
    pub fn decode(&mut self, code: u8) -> u8 {
        let byte = self.symbols[code as usize];
        self.move_to_front(code as usize);
        byte
    }

    fn move_to_front(&mut self, pos: usize) {
        if pos > 0 {
            let byte = self.symbols[pos];
            self.symbols.copy_within(0..pos, 1);
            self.symbols[0] = byte;
        }
    }
}

/// Perform Move-to-Front transform.
pub fn transform(data: &[u8]) -> Vec<u8> {
    let mut table = MtfTable::new();
    data.iter().map(|&byte| table.encode(byte)).collect()
}

/// Perform inverse Move-to-Front transform.
pub fn inverse_transform(data: &[u8]) -> Vec<u8> {
    let mut table = MtfTable::new();
    data.iter().map(|&code| table.decode(code)).collect()
}

/// The move-to-front stage. Output has one code byte per input byte and
/// no header.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveToFront;

impl Codec for MoveToFront {
    fn name(&self) -> &'static str {
        "mtf"
    }

    fn encode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()> {
        let mut table = MtfTable::new();
        let mut count = 0u64;
        while !input.is_empty()? {
            let byte = input.read_byte()?;
            output.write_byte(table.encode(byte))?;
            count += 1;
        }
        debug!("mtf: encoded {} bytes", count);
        Ok(())
    }

    fn decode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()> {
        let mut table = MtfTable::new();
        let mut count = 0u64;
        while !input.is_empty()? {
            let code = input.read_byte()?;
            output.write_byte(table.decode(code))?;
            count += 1;
        }
        debug!("mtf: decoded {} bytes", count);
        Ok(())
    }
}
