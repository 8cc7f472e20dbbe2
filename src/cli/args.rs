//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use super::OutputFormat;

/// Decode a database result set into a typed frame.
#[derive(Parser, Debug)]
#[command(name = "dbframe")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON result document to decode (stdin when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Decode configuration file (TOML)
    #[arg(short = 'c', long = "config", value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Do not flatten JSON columns
    #[arg(long = "no-flatten")]
    pub no_flatten: bool,

    /// Treat the result as a log frame regardless of the document
    #[arg(long = "logs")]
    pub logs: bool,

    /// List the registered type rules
    #[arg(long = "list-types")]
    pub list_types: bool,

    /// Show which rule a wire type string resolves to
    #[arg(long = "resolve", value_name = "TYPE")]
    pub resolve: Option<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Check if this is an info-only command (no input document needed).
    pub fn is_info_only(&self) -> bool {
        self.list_types || self.resolve.is_some()
    }
}
