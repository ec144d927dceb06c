//! LineSleuth CLI — terminal front-end for the core scanner.
//!
//! Usage:
//!   linesleuth [PATH]                    Scan and print a per-language table
//!   linesleuth [PATH] --format json      Emit the result as JSON
//!   linesleuth --help                    Show help
//!
//! This crate contains no scanning logic: it parses arguments, starts a
//! scan through `linesleuth-core`, drains the event channel, and maps
//! the terminal outcome to the terminal surface and exit code.

pub mod report;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use linesleuth_core::classify::DEFAULT_SIZE_LIMIT_BYTES;
use linesleuth_core::scanner::progress::ScanEvent;
use linesleuth_core::scanner::{start_scan, ScanOptions};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(
    name = "linesleuth",
    version,
    about = "Count lines of code per language",
    long_about = "linesleuth recursively scans a directory, classifies files by \
                  extension, and reports line totals per language.\n\n\
                  Dependency and VCS directories (node_modules, .git, target, …) \
                  and lockfiles are skipped by default."
)]
pub struct Cli {
    /// Directory to scan (defaults to the current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Per-file size ceiling in bytes; larger files are skipped uncounted
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_SIZE_LIMIT_BYTES)]
    limit_bytes: u64,

    /// Additional directory basename to skip (repeatable)
    #[arg(long = "ignore-dir", value_name = "NAME")]
    ignore_dirs: Vec<String>,

    /// Additional file basename to skip (repeatable)
    #[arg(long = "ignore-file", value_name = "NAME")]
    ignore_files: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parse arguments, run one scan to completion, render the result.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut options = ScanOptions {
        size_limit_bytes: cli.limit_bytes,
        ..ScanOptions::default()
    };
    for dir in &cli.ignore_dirs {
        options.classifier.ignore_dir(dir);
    }
    for file in &cli.ignore_files {
        options.classifier.ignore_file(file);
    }

    let handle = start_scan(cli.path.clone(), options);

    loop {
        match handle.events.recv() {
            Ok(ScanEvent::Counted { path }) => debug!("counted {path}"),
            Ok(ScanEvent::ReadError { path, message }) => warn!("skipped {path}: {message}"),
            Ok(ScanEvent::Complete {
                result,
                duration,
                error_count,
            }) => {
                match cli.format {
                    OutputFormat::Text => {
                        print!("{}", report::render_text(&result, duration, error_count));
                    }
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                }
                return Ok(());
            }
            // The CLI never cancels, but the outcome is part of the
            // channel contract.
            Ok(ScanEvent::Cancelled) => bail!("scan cancelled"),
            Ok(ScanEvent::Failed(err)) => return Err(err.into()),
            Err(_) => bail!("scanner exited without a terminal event"),
        }
    }
}
