//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cybercafe day simulator.
///
/// Replays a recorded day of client events against the cafe state machine
/// and reports per-table revenue and occupancy.
#[derive(Debug, Parser)]
#[command(name = "cafe", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a day file and print the transcript and closing stats.
    Run {
        /// The day file to replay.
        file: PathBuf,

        /// Print the closing report as JSON instead of the transcript.
        #[arg(long)]
        json: bool,
    },

    /// Parse and order-check a day file without replaying it.
    Check {
        /// The day file to check.
        file: PathBuf,
    },
}
