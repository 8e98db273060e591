//! Fixed-capacity ring buffer of bits.
//!
//! Bits are pushed onto the back and shifted off the front in groups of
//! one to eight, most significant bit first. When the write position
//! reaches the end of storage it wraps around to the start, so a value
//! may straddle the physical end of the buffer.
//!
//! ```
//! use burrows_core::ringbuffer::BitRingBuffer;
//!
//! // 12/31/1999 as 4 bits of month, 5 bits of day, 12 bits of year.
//! let mut buffer = BitRingBuffer::new(24);
//! buffer.push(12, 4).unwrap();
//! buffer.push(31, 5).unwrap();
//! buffer.push(7, 4).unwrap();
//! buffer.push(207, 8).unwrap();
//!
//! assert_eq!(buffer.shift(4).unwrap(), 12);
//! assert_eq!(buffer.shift(5).unwrap(), 31);
//! assert_eq!(buffer.shift(4).unwrap(), 7);
//! assert_eq!(buffer.shift(8).unwrap(), 207);
//! ```

use crate::error::{BurrowsError, Result, check_bit_count};

/// A ring buffer addressed at bit granularity.
#[derive(Debug, Clone)]
pub struct BitRingBuffer {
    /// Underlying storage, `capacity / 8` bytes.
    storage: Vec<u8>,
    /// Capacity in bits (a positive multiple of 8).
    capacity: usize,
    /// Number of bits currently held.
    size: usize,
    /// Bit position of the first held bit.
    start: usize,
    /// Bit position immediately after the last held bit.
    end: usize,
}

impl BitRingBuffer {
    /// Create an empty buffer holding up to `capacity` bits.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or not a multiple of 8.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive (got {})", capacity);
        assert!(
            capacity % 8 == 0,
            "capacity must be a multiple of 8 (got {})",
            capacity
        );

        Self {
            storage: vec![0; capacity / 8],
            capacity,
            size: 0,
            start: 0,
            end: 0,
        }
    }

    /// Create a full buffer containing exactly `bytes`.
    ///
    /// An empty slice yields an empty one-byte buffer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let capacity = (bytes.len() * 8).max(8);
        let mut storage = bytes.to_vec();
        storage.resize(capacity / 8, 0);

        let size = bytes.len() * 8;
        Self {
            storage,
            capacity,
            size,
            start: 0,
            end: size % capacity,
        }
    }

    /// Capacity in bits.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bits currently held.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the buffer holds no bits.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of bits that can still be pushed.
    pub fn remaining(&self) -> usize {
        self.capacity - self.size
    }

    /// Discard all held bits.
    pub fn clear(&mut self) {
        self.size = 0;
        self.start = 0;
        self.end = 0;
    }

    /// Push the low `bits` bits of `value` onto the back of the buffer.
    pub fn push(&mut self, value: u8, bits: u8) -> Result<()> {
        check_bit_count(bits)?;
        if bits < 8 && value >> bits != 0 {
            return Err(BurrowsError::value_too_wide(value, bits));
        }

        let count = bits as usize;
        if self.size + count > self.capacity {
            return Err(BurrowsError::capacity_exceeded(
                self.capacity,
                self.size,
                count,
            ));
        }

        if count == 8 && self.end % 8 == 0 {
            self.storage[self.end / 8] = value;
        } else {
            for i in (0..count).rev() {
                self.put_bit(self.end + (count - 1 - i), (value >> i) & 1 == 1);
            }
        }

        self.end = (self.end + count) % self.capacity;
        self.size += count;
        Ok(())
    }

    /// Shift `bits` bits off the front of the buffer.
    ///
    /// The first bit shifted ends up in the most significant position of
    /// the result.
    pub fn shift(&mut self, bits: u8) -> Result<u8> {
        check_bit_count(bits)?;

        let count = bits as usize;
        if self.size < count {
            return Err(BurrowsError::underflow(count, self.size));
        }

        let result = if count == 8 && self.start % 8 == 0 {
            self.storage[self.start / 8]
        } else {
            (0..count).fold(0u8, |acc, i| (acc << 1) | self.get_bit(self.start + i) as u8)
        };

        self.start = (self.start + count) % self.capacity;
        self.size -= count;
        Ok(result)
    }

    fn put_bit(&mut self, position: usize, bit: bool) {
        let position = position % self.capacity;
        let mask = 0x80u8 >> (position % 8);
        let byte = &mut self.storage[position / 8];
        if bit {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    fn get_bit(&self, position: usize) -> bool {
        let position = position % self.capacity;
        self.storage[position / 8] & (0x80u8 >> (position % 8)) != 0
    }
}
