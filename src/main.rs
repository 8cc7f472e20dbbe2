//! dbframe CLI entry point.

use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dbframe::cli::{write_resolution, write_type_rules, Args, OutputFormatter};
use dbframe::input::{JsonRowScanner, ResultDocument};
use dbframe::{decode_document, load_config};
use dbframe_core::default_registry;

fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let registry = default_registry();

    // Handle info-only commands
    if args.is_info_only() {
        let mut stdout = io::stdout();
        if args.list_types {
            write_type_rules(&registry, &mut stdout)?;
        }
        if let Some(type_name) = &args.resolve {
            if !write_resolution(&registry, type_name, &mut stdout)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(args.config.as_deref(), args.no_flatten)?;

    let document = match &args.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open result document: {}", path.display()))?;
            ResultDocument::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to read result document: {}", path.display()))?
        }
        None => ResultDocument::from_reader(io::stdin().lock())
            .context("Failed to read result document from stdin")?,
    };

    let mut meta = document.meta();
    if args.logs {
        meta.preferred_visualization = Some(dbframe_core::Visualization::Logs);
    }
    let name = document.name.clone();
    let mut scanner = JsonRowScanner::new(document);

    let batch = decode_document(&registry, &config, &name, meta, &mut scanner)
        .with_context(|| format!("Failed to decode result '{name}'"))?;
    info!(rows = batch.num_rows(), columns = batch.num_columns(), "Decoded result");

    let formatter = OutputFormatter::new(args.format);
    formatter.write(&batch, &mut io::stdout())?;

    Ok(ExitCode::SUCCESS)
}
