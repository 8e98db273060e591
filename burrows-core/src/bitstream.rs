//! Bit-level I/O operations for the compression stages.
//!
//! This module provides the [`BitRead`] and [`BitWrite`] capabilities and
//! their implementations:
//!
//! - [`BitReader`] reads bits from any live `Read` source (e.g. stdin).
//! - [`BitSource`] reads bits from a fixed in-memory byte buffer, with
//!   identical bit semantics, for tests and in-process pipelines.
//! - [`BitWriter`] writes bits to any `Write` sink, including `Vec<u8>`.
//!
//! # Bit Ordering
//!
//! All stages use MSB-first ordering: the first bit read from or written
//! to a byte is its most significant bit. Multi-bit values and 32-bit
//! integers are likewise most significant bit (and byte) first.
//!
//! # Example
//!
//! ```
//! use burrows_core::bitstream::{BitRead, BitSource, BitWrite, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_u32(0xFEEDFACE).unwrap();
//! writer.close().unwrap();
//! let output = writer.into_inner();
//!
//! let mut reader = BitSource::new(&output);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_u32().unwrap(), 0xFEEDFACE);
//! ```

use crate::error::{BurrowsError, Result, check_bit_count};
use crate::ringbuffer::BitRingBuffer;
use log::trace;
use std::io::{ErrorKind, Read, Write};

/// Capability to read a sequence of bits.
pub trait BitRead {
    /// Read `count` bits (1..=8), returned right-aligned.
    ///
    /// Fails with [`BurrowsError::Underflow`] if fewer than `count` bits
    /// remain and no more can be sourced.
    fn read_bits(&mut self, count: u8) -> Result<u8>;

    /// Read a 32-bit unsigned integer, most significant byte first.
    ///
    /// Fails with [`BurrowsError::Underflow`] without consuming anything
    /// if fewer than 32 bits remain.
    fn read_u32(&mut self) -> Result<u32>;

    /// Check whether no bits remain.
    fn is_empty(&mut self) -> Result<bool>;

    /// Read a single bit.
    fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Read eight bits.
    fn read_byte(&mut self) -> Result<u8> {
        self.read_bits(8)
    }

    /// Read whole bytes until the stream is empty.
    fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        while !self.is_empty()? {
            bytes.push(self.read_byte()?);
        }
        Ok(bytes)
    }

    /// Release the source. Reading sources have nothing to flush.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Capability to write a sequence of bits.
///
/// Every write returns `Ok(false)` once the writer has been closed, so
/// callers can simply stop; I/O failures are still reported as errors.
pub trait BitWrite {
    /// Write the low `count` bits (1..=8) of `value`, most significant first.
    fn write_bits(&mut self, value: u8, count: u8) -> Result<bool>;

    /// Flush any partial byte, left-justified and zero padded, then flush
    /// the sink. Fails with [`BurrowsError::AlreadyClosed`] on a second call.
    fn close(&mut self) -> Result<()>;

    /// Whether [`close`](Self::close) has succeeded.
    fn is_closed(&self) -> bool;

    /// Write a single bit.
    fn write_bit(&mut self, bit: bool) -> Result<bool> {
        self.write_bits(bit as u8, 1)
    }

    /// Write eight bits.
    fn write_byte(&mut self, byte: u8) -> Result<bool> {
        self.write_bits(byte, 8)
    }

    /// Write a 32-bit unsigned integer, most significant byte first.
    fn write_u32(&mut self, value: u32) -> Result<bool> {
        for byte in value.to_be_bytes() {
            if !self.write_byte(byte)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Write every byte of `bytes`.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<bool> {
        for &byte in bytes {
            if !self.write_byte(byte)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<T: BitRead + ?Sized> BitRead for &mut T {
    fn read_bits(&mut self, count: u8) -> Result<u8> {
        (**self).read_bits(count)
    }

    fn read_u32(&mut self) -> Result<u32> {
        (**self).read_u32()
    }

    fn is_empty(&mut self) -> Result<bool> {
        (**self).is_empty()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<T: BitWrite + ?Sized> BitWrite for &mut T {
    fn write_bits(&mut self, value: u8, count: u8) -> Result<bool> {
        (**self).write_bits(value, count)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

/// Mask with the low `bits` bits set.
#[inline]
fn low_mask(bits: u8) -> u64 {
    (1u64 << bits) - 1
}

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bytes are pulled from the underlying reader one at a time as bits are
/// needed; wrap unbuffered sources in a `BufReader`.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer (MSB-first, right-aligned).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Set once the underlying reader reports end of input.
    exhausted: bool,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            exhausted: false,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Pull one more byte into the buffer. Returns `false` at end of input.
    fn pull_byte(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }

        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    trace!(
                        "bit reader exhausted after {} bits",
                        self.total_bits_read + self.bits_in_buffer as u64
                    );
                    self.exhausted = true;
                    return Ok(false);
                }
                Ok(_) => {
                    self.buffer = (self.buffer << 8) | byte[0] as u64;
                    self.bits_in_buffer += 8;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Ensure at least `count` bits (at most 32) are buffered.
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot fill more than 32 bits at once");

        while self.bits_in_buffer < count {
            if !self.pull_byte()? {
                return Err(BurrowsError::underflow(
                    count as usize,
                    self.bits_in_buffer as usize,
                ));
            }
        }
        Ok(())
    }

    /// Remove `count` buffered bits from the front of the buffer.
    fn take(&mut self, count: u8) -> u64 {
        let shift = self.bits_in_buffer - count;
        let value = (self.buffer >> shift) & low_mask(count);
        self.bits_in_buffer = shift;
        self.buffer &= low_mask(shift);
        self.total_bits_read += count as u64;
        value
    }
}

impl<R: Read> BitRead for BitReader<R> {
    fn read_bits(&mut self, count: u8) -> Result<u8> {
        check_bit_count(count)?;
        self.fill_buffer(count)?;
        Ok(self.take(count) as u8)
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.fill_buffer(32)?;
        Ok(self.take(32) as u32)
    }

    fn is_empty(&mut self) -> Result<bool> {
        if self.bits_in_buffer > 0 {
            return Ok(false);
        }
        Ok(!self.pull_byte()?)
    }
}

/// A bit reader over a fixed in-memory byte buffer.
///
/// Used as a stand-in for a live source in tests and to chain stages in
/// memory. [`reset`](Self::reset) reloads it with new content.
#[derive(Debug, Clone)]
pub struct BitSource {
    buffer: BitRingBuffer,
    total_bits_read: u64,
}

impl BitSource {
    /// Create a source that yields exactly the bits of `content`.
    pub fn new(content: &[u8]) -> Self {
        Self {
            buffer: BitRingBuffer::from_bytes(content),
            total_bits_read: 0,
        }
    }

    /// Replace the remaining content with `content`.
    pub fn reset(&mut self, content: &[u8]) {
        self.buffer = BitRingBuffer::from_bytes(content);
        self.total_bits_read = 0;
    }

    /// Number of bits not yet read.
    pub fn remaining_bits(&self) -> usize {
        self.buffer.len()
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }
}

impl BitRead for BitSource {
    fn read_bits(&mut self, count: u8) -> Result<u8> {
        let value = self.buffer.shift(count)?;
        self.total_bits_read += count as u64;
        Ok(value)
    }

    fn read_u32(&mut self) -> Result<u32> {
        if self.buffer.len() < 32 {
            return Err(BurrowsError::underflow(32, self.buffer.len()));
        }

        let mut value = 0u32;
        for _ in 0..4 {
            value = (value << 8) | self.read_bits(8)? as u32;
        }
        Ok(value)
    }

    fn is_empty(&mut self) -> Result<bool> {
        Ok(self.buffer.is_empty())
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits and writes each completed byte to the
/// underlying writer. Call [`BitWrite::close`] exactly once when done;
/// dropping an unclosed writer loses up to 7 trailing bits.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Pending bits (right-aligned), always fewer than 8 between calls.
    buffer: u32,
    /// Number of pending bits.
    bits_in_buffer: u8,
    /// Set by a successful `close()`.
    closed: bool,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            closed: false,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume this `BitWriter` and return the underlying writer.
    ///
    /// Pending bits are discarded unless the writer was closed first.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Get the total number of bits written so far (excluding padding).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }
}

impl<W: Write> BitWrite for BitWriter<W> {
    fn write_bits(&mut self, value: u8, count: u8) -> Result<bool> {
        if self.closed {
            return Ok(false);
        }

        check_bit_count(count)?;
        if count < 8 && value >> count != 0 {
            return Err(BurrowsError::value_too_wide(value, count));
        }

        self.buffer = (self.buffer << count) | value as u32;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        if self.bits_in_buffer >= 8 {
            // Drain before writing so a failed sink leaves fewer than 8 bits.
            let shift = self.bits_in_buffer - 8;
            let byte = (self.buffer >> shift) as u8;
            self.bits_in_buffer = shift;
            self.buffer &= low_mask(shift) as u32;
            self.writer.write_all(&[byte])?;
        }

        Ok(true)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(BurrowsError::AlreadyClosed);
        }

        if self.bits_in_buffer > 0 {
            // Left-justify the remaining bits.
            let byte = (self.buffer << (8 - self.bits_in_buffer)) as u8;
            self.writer.write_all(&[byte])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }

        self.writer.flush()?;
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
