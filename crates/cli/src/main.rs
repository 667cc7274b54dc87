// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! lot - parking lot occupancy CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{park, query, submit, sweep, Context};
use lot_core::CONFIG_ENV;
use std::path::PathBuf;

use crate::error::CliError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "lot", version, about = "Parking lot occupancy")]
struct Cli {
    /// Lot config file
    #[arg(long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reserve a spot for a vehicle
    Park(park::ParkArgs),
    /// Release the spot held by a vehicle
    Leave(park::LeaveArgs),
    /// Show the spot a vehicle is parked in
    Locate(query::LocateArgs),
    /// List vacant spots
    Vacant,
    /// Count vacant spots
    Count,
    /// List occupied spots and their plates
    Occupied,
    /// Show the spot most likely to be free next
    Next,
    /// Flag overdue sessions once and exit
    Sweep,
    /// Run a JSON request (`-` reads it from stdin)
    Submit(submit::SubmitArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let format = OutputFormat::from_json_flag(cli.json);
    if let Err(e) = run(cli, format) {
        let error = CliError::from(e);
        output::print_error(&error, format);
        std::process::exit(error.exit_code);
    }
}

fn run(cli: Cli, format: OutputFormat) -> Result<()> {
    let ctx = Context::open(cli.config.as_deref(), format)?;

    match cli.command {
        Commands::Park(args) => park::park(&ctx, args),
        Commands::Leave(args) => park::leave(&ctx, args),
        Commands::Locate(args) => query::locate(&ctx, &args.plate),
        Commands::Vacant => query::vacant(&ctx),
        Commands::Count => query::count(&ctx),
        Commands::Occupied => query::occupied(&ctx),
        Commands::Next => query::next(&ctx),
        Commands::Sweep => sweep::sweep(&ctx),
        Commands::Submit(args) => submit::submit(&ctx, args),
    }
}

/// Log to stderr, `warn` unless `RUST_LOG` says otherwise
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
