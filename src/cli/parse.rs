//! CLI parse: clap types for CodeCity. No behavior; definitions only.

use crate::layout::TieBreak;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CodeCity CLI - Deterministic city layouts for file trees
#[derive(Parser)]
#[command(name = "codecity")]
#[command(about = "Lay out a file tree as a city: streets for directories, buildings for files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a city layout and print it
    Layout {
        /// Read the source tree from a flat JSON file instead of scanning
        #[arg(long, conflicts_with = "root")]
        tree: Option<PathBuf>,
        /// Directory to scan (defaults to the workspace root)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Output format
        #[arg(long, default_value = "json", value_parser = ["json", "ascii", "summary"])]
        format: String,
        /// Deepest directory level expanded into a street (root = 0)
        #[arg(long)]
        max_depth: Option<u32>,
        /// Side preferred when both sides fit (prefer_north, prefer_south, alternate)
        #[arg(long)]
        tie_break: Option<TieBreak>,
        /// Colorize ASCII output
        #[arg(long)]
        color: bool,
    },
    /// Scan a directory into a source tree
    Scan {
        /// Directory to scan (defaults to the workspace root)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Output format
        #[arg(long, default_value = "json", value_parser = ["json", "summary"])]
        format: String,
    },
    /// Show the effective configuration as TOML
    Config,
}
