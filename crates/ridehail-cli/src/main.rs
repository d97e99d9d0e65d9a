//! ridehail - CLI tool for the ride-hailing REST API.
//!
//! This is a thin wrapper over the `ridehail` library: each subcommand logs
//! in with the configured credentials, performs one or more resource calls
//! and prints the results as JSON.

mod cli;
mod commands;
mod config;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use config::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(cli.api_url.as_deref(), cli.credentials)?;

    match cli.command {
        Commands::Token(args) => commands::token::run(&settings, args).await,
        Commands::Quotes(cmd) => commands::quotes::handle(&settings, cmd).await,
        Commands::Bookings(cmd) => commands::bookings::handle(&settings, cmd).await,
        Commands::Webhooks(cmd) => commands::webhooks::handle(&settings, cmd).await,
        Commands::Demo(args) => commands::demo::run(&settings, args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays machine-readable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
