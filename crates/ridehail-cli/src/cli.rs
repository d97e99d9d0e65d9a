//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{bookings, demo, quotes, token, webhooks};

/// Ride-hailing API client for quotes, bookings and webhooks.
#[derive(Parser, Debug)]
#[command(name = "ridehail")]
#[command(author, version = env!("RIDEHAIL_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL
    #[arg(long, env = "RIDEHAIL_API_URL", global = true)]
    pub api_url: Option<String>,

    /// YAML file with `username` and `password`
    /// (defaults to credentials.yml in the user config directory)
    #[arg(long, env = "RIDEHAIL_CREDENTIALS", global = true)]
    pub credentials: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and show when the access token expires
    Token(token::TokenArgs),

    /// Search and retrieve quotes
    Quotes(quotes::QuotesCommand),

    /// Create, inspect and cancel bookings
    Bookings(bookings::BookingsCommand),

    /// Manage the account webhook
    Webhooks(webhooks::WebhooksCommand),

    /// Run the full quote, book and cancel flow
    Demo(demo::DemoArgs),
}
