// resegment-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Resegment: split videos into fixed-length segments",
    long_about = "Splits every video in a directory into fixed-length segments with ffmpeg, \
                  drops fragments that are too short, and renames the results so that no two \
                  names collide, even on case-insensitive filesystems."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Also write a log file (resegment_<timestamp>.log) into this directory
    #[arg(long, global = true, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Show debug output, including the ffmpeg commands being run
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Splits, filters and renames every video in the input directory
    Run(RunArgs),
    /// Renames the videos in a directory without splitting anything
    Rename(RenameArgs),
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Directory containing the source videos
    #[arg(short = 'i', long = "input", default_value = ".", value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory for the segments (defaults to INPUT_DIR/output_videos)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Length of each segment in seconds
    #[arg(long, default_value_t = 120, value_name = "SECONDS",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub segment_secs: u64,

    /// Fragments shorter than this many seconds are deleted
    #[arg(long, default_value_t = 50.0, value_name = "SECONDS")]
    pub min_secs: f64,

    /// Keep the source videos after they have been split
    #[arg(long, default_value_t = false)]
    pub keep_originals: bool,

    /// Kill ffmpeg if a single split runs longer than this many seconds
    #[arg(long, value_name = "SECONDS", env = "RESEGMENT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Print the run summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct RenameArgs {
    /// Directory whose videos should be renamed
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Extension to match, including the dot (repeatable; replaces the defaults)
    #[arg(long = "ext", value_name = "EXT", action = ArgAction::Append)]
    pub extensions: Vec<String>,

    /// Show the planned names without moving anything
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Print the rename report as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Commands {
    /// True when stdout is reserved for a JSON document.
    pub fn wants_json(&self) -> bool {
        match self {
            Commands::Run(args) => args.json,
            Commands::Rename(args) => args.json,
        }
    }
}
