use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "veriscan")]
#[command(author, version, about = "File integrity scanner - detect corrupted files in a tree")]
#[command(long_about = "Walks directory trees, hashes every file and runs \
    format-aware integrity checks.\n\n\
    Exit codes:\n  \
    0 - Every file intact\n  \
    1 - Corrupted, inaccessible or unknown files found\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan directories and verify file integrity
    Scan(ScanArgs),

    /// Generate a default configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct ScanArgs {
    /// Directories to scan
    #[arg(default_value = ".")]
    pub roots: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not descend into subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// Only check files matching these globs (can be repeated)
    #[arg(long, short = 'f')]
    pub filter: Vec<String>,

    /// Only check these extensions (comma-separated, e.g., csv,xlsx)
    #[arg(long, value_delimiter = ',')]
    pub ext: Option<Vec<String>>,

    /// Worker thread count (default: one per CPU)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Per-file budget in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Disable the per-file watchdog entirely
    #[arg(long, conflicts_with = "timeout")]
    pub no_timeout: bool,

    /// Skip the advanced spreadsheet engine even when available
    #[arg(long)]
    pub basic_only: bool,

    /// Negotiate with the installer component when the advanced engine is
    /// absent (the stock build ships none and stays at container-level checks)
    #[arg(long)]
    pub auto_install: bool,

    /// Output format, overriding any configured default [possible values: text, json, csv]
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the report to a timestamped file in the current directory
    #[arg(long, conflicts_with = "output")]
    pub save: bool,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = ".veriscan.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
