//! Stage commands: run one codec over stdin/stdout.

use burrows_core::{BitReader, BitWriter, Codec, Direction};
use log::info;
use std::io::{self, BufWriter};

pub fn cmd_stage(codec: &dyn Codec, direction: Direction) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut input = BitReader::new(stdin.lock());
    let mut output = BitWriter::new(BufWriter::new(stdout.lock()));

    // Closes (and flushes) the output on every path.
    codec.apply(direction, &mut input, &mut output)?;

    info!(
        "{} {}: read {} bits, wrote {} bits",
        codec.name(),
        direction,
        input.bits_read(),
        output.bits_written()
    );
    Ok(())
}
