//! Core traits for the compression stages.
//!
//! Every stage of the pipeline (Burrows-Wheeler, move-to-front, Huffman)
//! is a [`Codec`]: a pair of inverse operations from one bit stream to
//! another, selected at run time by a [`Direction`].

use crate::bitstream::{BitRead, BitSource, BitWrite, BitWriter};
use crate::error::{BurrowsError, Result};
use std::fmt;
use std::str::FromStr;

/// Which way a stage is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Transform / encode / compress (`-` on the command line).
    Forward,
    /// Inverse transform / decode / expand (`+` on the command line).
    Inverse,
}

impl Direction {
    /// The command-line mode argument for this direction.
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::Forward => "-",
            Self::Inverse => "+",
        }
    }
}

impl FromStr for Direction {
    type Err = BurrowsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" => Ok(Self::Forward),
            "+" => Ok(Self::Inverse),
            other => Err(BurrowsError::invalid_mode(other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// A reversible stage operating on bit streams.
///
/// Implementations must not hold state between calls: each call builds its
/// own tables, so a single codec value can be shared freely.
pub trait Codec {
    /// Short stage name, used in logs.
    fn name(&self) -> &'static str;

    /// Apply the forward direction, reading `input` until it is empty.
    fn encode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()>;

    /// Apply the inverse direction.
    fn decode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()>;

    /// Apply `direction`, then close `output` unless the stage already did.
    ///
    /// The output is closed on the error path too, and the stage's own
    /// error takes precedence over a failure to close.
    fn apply(
        &self,
        direction: Direction,
        input: &mut dyn BitRead,
        output: &mut dyn BitWrite,
    ) -> Result<()> {
        log::debug!("{}: applying {:?}", self.name(), direction);

        let result = match direction {
            Direction::Forward => self.encode(input, output),
            Direction::Inverse => self.decode(input, output),
        };

        let closed = if output.is_closed() {
            Ok(())
        } else {
            output.close()
        };

        result.and(closed)
    }

    /// Apply `direction` to an in-memory buffer.
    fn apply_bytes(&self, direction: Direction, data: &[u8]) -> Result<Vec<u8>> {
        let mut source = BitSource::new(data);
        let mut writer = BitWriter::new(Vec::new());
        self.apply(direction, &mut source, &mut writer)?;
        Ok(writer.into_inner())
    }

    /// Encode an in-memory buffer.
    fn encode_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.apply_bytes(Direction::Forward, data)
    }

    /// Decode an in-memory buffer.
    fn decode_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.apply_bytes(Direction::Inverse, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverts every bit; its own inverse.
    struct Invert;

    impl Codec for Invert {
        fn name(&self) -> &'static str {
            "invert"
        }

        fn encode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()> {
            while !input.is_empty()? {
                output.write_bit(!input.read_bit()?)?;
            }
            Ok(())
        }

        fn decode(&self, input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()> {
            self.encode(input, output)
        }
    }

    /// Writes three bits, then fails.
    struct Failing;

    impl Codec for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn encode(&self, _input: &mut dyn BitRead, output: &mut dyn BitWrite) -> Result<()> {
            output.write_bits(0b111, 3)?;
            Err(BurrowsError::corrupted("boom"))
        }

        fn decode(&self, input: &mut dyn BitRead, _output: &mut dyn BitWrite) -> Result<()> {
            input.read_u32().map(|_| ())
        }
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("-".parse::<Direction>().unwrap(), Direction::Forward);
        assert_eq!("+".parse::<Direction>().unwrap(), Direction::Inverse);
        assert!(matches!(
            "x".parse::<Direction>(),
            Err(BurrowsError::InvalidMode { .. })
        ));
        assert!("".parse::<Direction>().is_err());
        assert!("--".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Forward.to_string(), "-");
        assert_eq!(Direction::Inverse.to_string(), "+");
    }

    #[test]
    fn test_apply_bytes() {
        let encoded = Invert.encode_bytes(&[0x0F, 0xA5]).unwrap();
        assert_eq!(encoded, vec![0xF0, 0x5A]);
        assert_eq!(Invert.decode_bytes(&encoded).unwrap(), vec![0x0F, 0xA5]);
    }

    #[test]
    fn test_apply_closes_output_on_error() {
        let mut source = BitSource::new(&[]);
        let mut writer = BitWriter::new(Vec::new());
        let err = Failing
            .apply(Direction::Forward, &mut source, &mut writer)
            .unwrap_err();

        assert!(matches!(err, BurrowsError::Corrupted { .. }));
        assert!(writer.is_closed());
        assert_eq!(writer.into_inner(), vec![0b1110_0000]);
    }

    #[test]
    fn test_apply_surfaces_underflow() {
        let err = Failing.decode_bytes(&[1, 2]).unwrap_err();
        assert!(err.is_underflow());
    }
}
