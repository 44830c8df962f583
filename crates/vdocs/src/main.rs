//! vdocs CLI - versioned documentation page generator.
//!
//! Provides commands for:
//! - `build`: Generate pages and write them to the output directory
//! - `check`: Run generation without writing anything
//! - `list`: Print the pages a build would produce

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs, ListArgs};
use output::Output;

/// vdocs - versioned documentation page generator.
#[derive(Parser)]
#[command(name = "vdocs", version, about)]
struct Cli {
    /// Enable verbose output (per-document progress logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate pages into the output directory.
    Build(BuildArgs),
    /// Validate navigation, versions and sources without writing pages.
    Check(CheckArgs),
    /// List the pages a build would generate.
    List(ListArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::List(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
