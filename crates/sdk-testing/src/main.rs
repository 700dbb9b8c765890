//! sdk-testing CLI - helpers for cluster integration test runs
//!
//! This is the main entry point for the sdk-testing command-line interface.
//! Every command is blocking; no async runtime is started.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    let config = cli.config.as_deref();

    // Run command
    match cli.command {
        Commands::Agents(args) => commands::agents::run(args, config),
        Commands::GcFrameworks(args) => commands::gc_frameworks::run(args, config),
        Commands::Retry(args) => commands::retry::run(args, config),
        Commands::Config(args) => commands::config::run(args, config),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
