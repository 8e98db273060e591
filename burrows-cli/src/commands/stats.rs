//! Stats command implementation.

use burrows_codec::huffman::{self, SymbolStats};
use serde::Serialize;
use std::io::{self, Read};

/// Code table report for one input.
#[derive(Debug, Serialize)]
struct StatsReport {
    bytes: u64,
    distinct: usize,
    encoded_bits: u64,
    symbols: Vec<SymbolRow>,
}

#[derive(Debug, Serialize)]
struct SymbolRow {
    symbol: u8,
    display: String,
    frequency: u64,
    code: String,
    encoded_bits: u64,
}

impl From<SymbolStats> for SymbolRow {
    fn from(stats: SymbolStats) -> Self {
        Self {
            symbol: stats.symbol,
            display: display_byte(stats.symbol),
            frequency: stats.frequency,
            code: stats.code,
            encoded_bits: stats.encoded_bits,
        }
    }
}

/// Printable form of a byte: the character itself, or an escape.
fn display_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        (byte as char).to_string()
    } else {
        byte.escape_ascii().to_string()
    }
}

fn build_report(data: &[u8]) -> StatsReport {
    let symbols: Vec<SymbolRow> = huffman::statistics(data)
        .into_iter()
        .map(SymbolRow::from)
        .collect();

    StatsReport {
        bytes: data.len() as u64,
        distinct: symbols.len(),
        encoded_bits: symbols.iter().map(|s| s.encoded_bits).sum(),
        symbols,
    }
}

pub fn cmd_stats(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut data = Vec::new();
    io::stdin().lock().read_to_end(&mut data)?;

    let report = build_report(&data);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{:>4}  {:>5}  {:>10}  {:>10}  Code", "Byte", "Char", "Frequency", "Bits");
    println!("{}", "-".repeat(44));
    for row in &report.symbols {
        println!(
            "{:>4}  {:>5}  {:>10}  {:>10}  {}",
            format!("{:02x}", row.symbol),
            row.display,
            row.frequency,
            row.encoded_bits,
            row.code
        );
    }
    println!("{}", "-".repeat(44));
    println!(
        "{} bytes, {} distinct, {} code bits ({} bytes)",
        report.bytes,
        report.distinct,
        report.encoded_bits,
        report.encoded_bits.div_ceil(8)
    );

    Ok(())
}
