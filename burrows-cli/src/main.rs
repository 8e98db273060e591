//! Burrows CLI - Burrows-Wheeler compression stages over stdin/stdout
//!
//! Every stage reads stdin and writes stdout, so stages can be chained
//! with pipes.

mod commands;

use burrows_codec::{BurrowsWheeler, Huffman, MoveToFront, Pipeline};
use burrows_core::Direction;
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use commands::{cmd_completions, cmd_hexdump, cmd_stage, cmd_stats};
use log::LevelFilter;
use std::io::Write;

#[derive(Parser)]
#[command(name = "burrows")]
#[command(
    author,
    version,
    about = "Burrows-Wheeler, move-to-front and Huffman compression stages"
)]
#[command(long_about = "
Burrows runs the stages of a bzip2-style compressor over stdin/stdout.
A mode of '-' applies the forward stage, '+' the inverse.

Examples:
  burrows bwt - < input.txt | burrows mtf - | burrows huffman - > out.bin
  burrows huffman + < out.bin | burrows mtf + | burrows bwt + > input.txt
  burrows pipeline - < input.txt > out.bin
  burrows pipeline + < out.bin > input.txt
  burrows bwt - < input.txt | burrows hexdump 16
  burrows stats --json < input.txt
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Burrows-Wheeler transform ('-') or its inverse ('+')
    Bwt {
        /// '-' to transform, '+' to invert
        #[arg(value_parser = parse_direction, allow_hyphen_values = true)]
        mode: Direction,
    },

    /// Move-to-front encode ('-') or decode ('+')
    Mtf {
        /// '-' to encode, '+' to decode
        #[arg(value_parser = parse_direction, allow_hyphen_values = true)]
        mode: Direction,
    },

    /// Huffman compress ('-') or expand ('+')
    Huffman {
        /// '-' to compress, '+' to expand
        #[arg(value_parser = parse_direction, allow_hyphen_values = true)]
        mode: Direction,
    },

    /// All three stages: compress ('-') or decompress ('+')
    #[command(alias = "p")]
    Pipeline {
        /// '-' to compress, '+' to decompress
        #[arg(value_parser = parse_direction, allow_hyphen_values = true)]
        mode: Direction,
    },

    /// Hex dump of stdin with a bit count
    Hexdump {
        /// Bytes per line
        #[arg(default_value_t = burrows_core::hexdump::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Huffman code table statistics for stdin
    Stats {
        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_direction(arg: &str) -> Result<Direction, String> {
    arg.parse().map_err(|e: burrows_core::BurrowsError| e.to_string())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    // RUST_LOG wins over -v.
    builder.parse_default_env();
    builder.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    let _ = builder.try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Bwt { mode } => cmd_stage(&BurrowsWheeler, mode),
        Commands::Mtf { mode } => cmd_stage(&MoveToFront, mode),
        Commands::Huffman { mode } => cmd_stage(&Huffman, mode),
        Commands::Pipeline { mode } => cmd_stage(&Pipeline, mode),
        Commands::Hexdump { limit } => cmd_hexdump(limit),
        Commands::Stats { json } => cmd_stats(json),
        Commands::Completions { shell } => cmd_completions::<Cli>(shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
