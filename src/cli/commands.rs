//! CLI commands and argument parsing

use crate::types::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stripe source connector CLI
#[derive(Parser, Debug)]
#[command(name = "stripe-source")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON with an `api_key` field)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline configuration JSON (takes precedence over --config)
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test the API key with a minimal request
    Check,

    /// Fetch every resource and emit row batches
    Read {
        /// Resources to read (comma-separated, empty = all)
        #[arg(long)]
        resources: Option<String>,
    },

    /// Show connector specification
    Spec,

    /// List resource names in emission order
    Resources,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
