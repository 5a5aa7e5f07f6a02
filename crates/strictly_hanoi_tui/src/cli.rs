//! Command-line interface for strictly_hanoi.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Hanoi - drag blocks between spikes in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_hanoi")]
#[command(about = "Peg-and-block puzzle played with the mouse", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a level in the terminal
    Play {
        /// Level file (TOML). Defaults to the built-in three-piece level.
        #[arg(short, long, conflicts_with = "pieces")]
        level: Option<PathBuf>,

        /// Generate a tower with this many pieces instead of loading a level
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=12))]
        pieces: Option<u16>,

        /// Milliseconds between repaint checks
        #[arg(long, default_value = "30")]
        tick_ms: u64,

        /// Level units per terminal column
        #[arg(long, default_value = "4.0")]
        scale_x: f64,

        /// Level units per terminal row
        #[arg(long, default_value = "10.0")]
        scale_y: f64,
    },

    /// Validate a level file and print a summary
    Check {
        /// Level file (TOML)
        file: PathBuf,
    },
}
