//! Hexdump command implementation.

use burrows_core::{BitReader, hexdump};
use log::info;
use std::io::{self, BufWriter, Write};

pub fn cmd_hexdump(limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut input = BitReader::new(stdin.lock());
    let mut out = BufWriter::new(stdout.lock());

    let bytes = hexdump::dump(&mut input, &mut out, limit)?;
    out.flush()?;

    info!("hexdump: {} bytes", bytes);
    Ok(())
}
