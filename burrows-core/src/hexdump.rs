//! Hexadecimal dump of a byte stream.
//!
//! Useful for inspecting the output of each stage: bytes are printed as
//! lowercase two-digit hex, `limit` per line, followed by the total bit
//! count.
//!
//! ```
//! use burrows_core::bitstream::BitSource;
//! use burrows_core::hexdump;
//!
//! let mut out = Vec::new();
//! hexdump::dump(&mut BitSource::new(b"foobar"), &mut out, 3).unwrap();
//! assert_eq!(out, b"66 6f 6f\n62 61 72\n48 bits\n");
//! ```

use crate::bitstream::BitRead;
use crate::error::Result;
use std::io::Write;

/// Bytes per line when no limit is given.
pub const DEFAULT_LIMIT: usize = 16;

/// Dump `input` to `out`, `limit` bytes per line (0 means [`DEFAULT_LIMIT`]).
///
/// Returns the number of bytes dumped.
pub fn dump<R, W>(input: &mut R, out: &mut W, limit: usize) -> Result<u64>
where
    R: BitRead + ?Sized,
    W: Write + ?Sized,
{
    let limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
    let mut bytes = 0u64;

    while !input.is_empty()? {
        let byte = input.read_byte()?;

        if bytes == 0 {
            write!(out, "{:02x}", byte)?;
        } else if bytes % limit as u64 == 0 {
            write!(out, "\n{:02x}", byte)?;
        } else {
            write!(out, " {:02x}", byte)?;
        }

        bytes += 1;
    }

    writeln!(out)?;
    writeln!(out, "{} bits", bytes * 8)?;
    Ok(bytes)
}
