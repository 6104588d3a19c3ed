// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kiln: bake machine images, one job per distinct request

mod commands;
mod env;
mod exit_error;
mod logging;
mod output;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{bake, config, plan};
use exit_error::{ExitError, EXIT_FAILURE};
use settings::Settings;

#[derive(Parser)]
#[command(name = "kiln", version, about = "Deduplicating machine image bakery")]
struct Cli {
    /// Settings file (default: $KILN_CONFIG, then <config dir>/kiln/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter directives, e.g. `debug` (default: $KILN_LOG, then `info`)
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the bake key and command a request resolves to
    Plan(plan::PlanArgs),
    /// Create a bake, reusing in-flight or successful work for the same key
    Bake(bake::BakeArgs),
    /// Print effective settings as TOML
    Config,
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    match cli.command {
        Command::Plan(args) => plan::handle(args, &settings),
        Command::Bake(args) => bake::handle(args, &settings).await,
        Command::Config => config::handle(&settings),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    if let Err(err) = run(cli).await {
        match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("Error: {}", exit.message);
                std::process::exit(exit.code);
            }
            None => {
                eprintln!("Error: {err:#}");
                std::process::exit(EXIT_FAILURE);
            }
        }
    }
}
