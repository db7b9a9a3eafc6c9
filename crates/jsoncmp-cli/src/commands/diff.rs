//! Diff command
//!
//! Usage: jsoncmp diff <FIRST> <SECOND> [--pretty | --summary]
//!
//! Prints the difference list as JSON. Exits 0 when the documents are
//! structurally equal and 1 when they differ.

use anyhow::{Context, Result};
use clap::Args;
use jsoncmp_core::diff::{diff_values, render_human_summary};
use jsoncmp_core::payload::normalize_negative_zero;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// First JSON document
    pub first: PathBuf,

    /// Second JSON document
    pub second: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long, conflicts_with = "summary")]
    pub pretty: bool,

    /// Print a human-readable summary instead of JSON
    #[arg(long)]
    pub summary: bool,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<ExitCode> {
    let first = read_document(&args.first)?;
    let second = read_document(&args.second)?;

    let differences = diff_values(&first, &second);

    if args.summary {
        print!("{}", render_human_summary(&differences));
    } else if args.pretty {
        println!("{}", serde_json::to_string_pretty(&differences)?);
    } else {
        println!("{}", serde_json::to_string(&differences)?);
    }

    if differences.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn read_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    normalize_negative_zero(&mut value);
    Ok(value)
}
