//! CLI module
//!
//! Command-line interface for running the connector.
//!
//! # Commands
//!
//! - `check` - Test the API key
//! - `read` - Emit row batches
//! - `spec` - Show the option schema
//! - `resources` - List resource names in emission order

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
