//! Burrows-Wheeler Transform.
//!
//! The BWT is a reversible permutation that groups bytes sharing the same
//! following context, making the data more compressible by the later
//! stages.
//!
//! Wire format of the forward transform:
//!
//! ```text
//! bytes[0..4)   start row, big-endian u32
//! bytes[4..]    last column, one byte per input byte
//! ```
//!
//! An empty input transforms to an empty stream, and an empty stream
//! inverts to an empty output. A header with no last column is rejected.

use crate::csa::CircularSuffixArray;
use burrows_core::RADIX;
use burrows_core::bitstream::{BitRead, BitWrite};
use burrows_core::error::{BurrowsError, Result, checked_len};
use burrows_core::traits::Codec;
use log::debug;

/// Output of the forward transform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transformed {
    /// Row of the sorted rotation matrix holding the original input.
    pub start: u32,
    /// Last byte of each sorted rotation.
    pub last_column: Vec<u8>,
}

impl Transformed {
    /// Length of the original input.
    pub fn len(&self) -> usize {
        self.last_column.len()
    }

    /// Check if the original input was empty.
    pub fn is_empty(&self) -> bool {
        self.last_column.is_empty()
    }

    /// Write in wire format. Writes nothing for an empty transform.
    pub fn write_to(&self, output: &mut dyn BitWrite) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        output.write_u32(self.start)?;
        output.write_bytes(&self.last_column)?;
        Ok(())
    }

    /// Read in wire format until `input` is empty.
    pub fn read_from(input: &mut dyn BitRead) -> Result<Self> {
        if input.is_empty()? {
            return Ok(Self::default());
        }
        let start = input.read_u32()?;
        let last_column = input.read_to_end()?;
        if last_column.is_empty() {
            return Err(BurrowsError::corrupted(format!(
                "BWT header (start row {}) without a last column",
                start
            )));
        }
        Ok(Self { start, last_column })
    }
}

/// Perform the Burrows-Wheeler Transform.
pub fn transform(data: &[u8]) -> Result<Transformed> {
    let n = data.len();
    checked_len(n)?;

    let csa = CircularSuffixArray::new(data);
    let mut start = 0;
    let last_column = csa
        .indices()
        .iter()
        .enumerate()
        .map(|(row, &offset)| {
            if offset == 0 {
                start = row as u32;
            }
            data[(n + offset - 1) % n]
        })
        .collect();

    Ok(Transformed { start, last_column })
}

/// Perform the inverse Burrows-Wheeler Transform in `O(n + R)`.
pub fn inverse_transform(transformed: &Transformed) -> Result<Vec<u8>> {
    let last_column = &transformed.last_column;
    let n = last_column.len();
    let start = transformed.start as usize;
    if n == 0 && start == 0 {
        return Ok(Vec::new());
    }
    if start >= n {
        return Err(BurrowsError::corrupted(format!(
            "BWT start row {} out of range for {} bytes",
            start, n
        )));
    }

    // Occurrences of each byte, and rank of each position among equal bytes.
    let mut counts = [0usize; RADIX];
    let mut rank = vec![0usize; n];
    for (i, &byte) in last_column.iter().enumerate() {
        rank[i] = counts[byte as usize];
        counts[byte as usize] += 1;
    }

    // counts[b] becomes the number of bytes strictly less than b.
    let mut total = 0;
    for count in counts.iter_mut() {
        let c = *count;
        *count = total;
        total += c;
    }

    // Row whose first column holds last_column[i].
    let next: Vec<usize> = last_column
        .iter()
        .zip(&rank)
        .map(|(&byte, &r)| counts[byte as usize] + r)
        .collect();

    let mut output = vec![0u8; n];
    let mut row = start;
    for slot in output.iter_mut().rev() {
        *slot = last_column[row];
        row = next[row];
    }

    Ok(output)
}

/// The Burrows-Wheeler stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurrowsWheeler;

impl Codec for BurrowsWheeler {
    fn name(&self) -> &'static str {
        "bwt"
    }

    fn encode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()> {
        let data = input.read_to_end()?;
        let transformed = transform(&data)?;
        debug!(
            "bwt: {} bytes, start row {}",
            transformed.len(),
            transformed.start
        );
        transformed.write_to(output)
    }

    fn decode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()> {
        let transformed = Transformed::read_from(input)?;
        let data = inverse_transform(&transformed)?;
        debug!("bwt: restored {} bytes", data.len());
        output.write_bytes(&data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABRA: &[u8] = b"ABRACADABRA!";

    #[test]
    fn test_bwt_abra() {
        let transformed = transform(ABRA).unwrap();
        assert_eq!(transformed.start, 3);
        assert_eq!(transformed.last_column, b"ARD!RCAAAABB");
        assert_eq!(
            transformed.last_column,
            vec![0x41, 0x52, 0x44, 0x21, 0x52, 0x43, 0x41, 0x41, 0x41, 0x41, 0x42, 0x42]
        );
    }

    #[test]
    fn test_inverse_abra() {
        let transformed = Transformed {
            start: 3,
            last_column: b"ARD!RCAAAABB".to_vec(),
        };
        assert_eq!(inverse_transform(&transformed).unwrap(), ABRA);
    }

    #[test]
    fn test_bwt_empty() {
        let transformed = transform(b"").unwrap();
        assert!(transformed.is_empty());
        assert_eq!(transformed.start, 0);
        assert!(inverse_transform(&transformed).unwrap().is_empty());
    }

    #[test]
    fn test_bwt_single() {
        let transformed = transform(b"a").unwrap();
        assert_eq!(transformed.last_column, b"a");
        assert_eq!(transformed.start, 0);
        assert_eq!(inverse_transform(&transformed).unwrap(), b"a");
    }

    #[test]
    fn test_bwt_roundtrip() {
        let test_cases = [
            b"hello world".as_slice(),
            b"abracadabra",
            b"mississippi",
            b"aaaaa",
            b"abcde",
            b"abababab",
            b"the quick brown fox jumps over the lazy dog",
            b"\x00\x00\xff\x00\xff",
        ];

        for data in test_cases {
            let transformed = transform(data).unwrap();
            let recovered = inverse_transform(&transformed).unwrap();
            assert_eq!(recovered, data, "Failed for: {:?}", data);
        }
    }

    #[test]
    fn test_bwt_groups_similar() {
        let transformed = transform(b"abababab").unwrap();
        let runs = 1 + transformed
            .last_column
            .windows(2)
            .filter(|w| w[0] != w[1])
            .count();
        assert!(runs <= 4, "BWT should group similar bytes");
    }

    #[test]
    fn test_inverse_rejects_bad_start() {
        let transformed = Transformed {
            start: 12,
            last_column: b"ARD!RCAAAABB".to_vec(),
        };
        assert!(matches!(
            inverse_transform(&transformed),
            Err(BurrowsError::Corrupted { .. })
        ));
    }

    #[test]
    fn test_codec_wire_format() {
        let encoded = BurrowsWheeler.encode_bytes(ABRA).unwrap();
        let mut expected = vec![0, 0, 0, 3];
        expected.extend_from_slice(b"ARD!RCAAAABB");
        assert_eq!(encoded, expected);

        assert_eq!(BurrowsWheeler.decode_bytes(&encoded).unwrap(), ABRA);
    }

    #[test]
    fn test_codec_empty() {
        assert!(BurrowsWheeler.encode_bytes(b"").unwrap().is_empty());
        assert!(BurrowsWheeler.decode_bytes(b"").unwrap().is_empty());
    }

    #[test]
    fn test_codec_rejects_header_without_column() {
        for header in [[0, 0, 0, 9], [0, 0, 0, 0]] {
            assert!(matches!(
                BurrowsWheeler.decode_bytes(&header),
                Err(BurrowsError::Corrupted { .. })
            ));
        }
    }

    #[test]
    fn test_inverse_rejects_start_on_empty_column() {
        let transformed = Transformed {
            start: 9,
            last_column: Vec::new(),
        };
        assert!(matches!(
            inverse_transform(&transformed),
            Err(BurrowsError::Corrupted { .. })
        ));
    }

    #[test]
    fn test_codec_truncated_header() {
        let err = BurrowsWheeler.decode_bytes(&[0, 0, 3]).unwrap_err();
        assert!(err.is_underflow());
    }
}
