//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Output formatting (table, CSV, JSON)
//! - Type registry listings

mod args;
mod output;
mod types;

pub use args::Args;
pub use output::{OutputFormat, OutputFormatter};
pub use types::{write_resolution, write_type_rules};
