//! jsoncmp CLI
//!
//! Runs the comparison service or diffs two JSON files offline.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "jsoncmp")]
#[command(about = "jsoncmp - structural JSON comparison", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP comparison service
    Serve(commands::serve::ServeArgs),
    /// Diff two JSON files (exit code 1 when they differ)
    Diff(commands::diff::DiffArgs),
}

fn main() -> ExitCode {
    // A missing .env is fine; settings fall back to flags and defaults
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args).map(|()| ExitCode::SUCCESS),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
