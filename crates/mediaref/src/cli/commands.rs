//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// mediaref - resolve media references into assets and samples
#[derive(Parser, Debug)]
#[command(name = "mediaref")]
#[command(about = "Resolve media references into assets and samples", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Where metadata comes from
    #[command(flatten)]
    pub source: SourceArgs,

    /// Configuration file (defaults to the layered mediaref.toml lookup)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Metadata source selection; exactly one is required.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// JSON file with an array of metadata records
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Media server API base URL, e.g. http://localhost/api
    #[arg(long)]
    pub server: Option<String>,

    /// Directory laid out as {scheme}/{authority}.json
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve assets and print every asset of the session
    Resolve {
        /// Media references, e.g. ref:Yesterday or uuid:c262fe9b
        #[arg(required = true)]
        ids: Vec<String>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Resolve samples and print their time windows
    Sample {
        /// Media references with optional #fragment
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Output format for listings
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per asset
    Human,
    /// JSON array
    Json,
}
