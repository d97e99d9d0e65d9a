//! Quote subcommands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use ridehail::QuoteListId;
use ridehail::api::{Geolocation, QuoteSearch};

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct QuotesCommand {
    #[command(subcommand)]
    pub command: QuotesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum QuotesSubcommand {
    /// Request quotes between two places
    Search(SearchArgs),

    /// Fetch a quote list by id
    Get(GetArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[arg(long, allow_hyphen_values = true, value_parser = coordinate)]
    pub origin_lat: String,

    #[arg(long, allow_hyphen_values = true, value_parser = coordinate)]
    pub origin_lng: String,

    #[arg(long)]
    pub origin_address: String,

    #[arg(long, allow_hyphen_values = true, value_parser = coordinate)]
    pub destination_lat: String,

    #[arg(long, allow_hyphen_values = true, value_parser = coordinate)]
    pub destination_lng: String,

    #[arg(long)]
    pub destination_address: String,

    /// Local pickup time, e.g. 2026-10-20T09:30 (default: as soon as possible)
    #[arg(long)]
    pub pickup_time: Option<String>,
}

/// Accept a decimal degree value but keep the text as typed.
fn coordinate(s: &str) -> Result<String, String> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(s.trim().to_string()),
        _ => Err(format!("'{}' is not a decimal coordinate", s)),
    }
}

impl SearchArgs {
    fn to_search(&self) -> QuoteSearch {
        let origin = Geolocation::new(&self.origin_lat, &self.origin_lng, &self.origin_address);
        let destination = Geolocation::new(
            &self.destination_lat,
            &self.destination_lng,
            &self.destination_address,
        );

        match &self.pickup_time {
            Some(at) => QuoteSearch::at(origin, destination, at),
            None => QuoteSearch::asap(origin, destination),
        }
    }
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Quote list id returned by `quotes search`
    pub id: QuoteListId,
}

pub async fn handle(settings: &Settings, cmd: QuotesCommand) -> Result<()> {
    match cmd.command {
        QuotesSubcommand::Search(args) => search(settings, args).await,
        QuotesSubcommand::Get(args) => get(settings, args).await,
    }
}

async fn search(settings: &Settings, args: SearchArgs) -> Result<()> {
    let client = settings.login().await?;

    let list = client
        .search_quotes(&args.to_search())
        .await
        .context("Failed to search quotes")?;

    output::success(&format!("Quote list {} ({})", list.id, list.status));
    output::json_pretty(&list)
}

async fn get(settings: &Settings, args: GetArgs) -> Result<()> {
    let client = settings.login().await?;

    let list = client
        .quote_list(&args.id)
        .await
        .context("Failed to get quote list")?;

    output::field("Quotes", &list.quotes.len().to_string());
    output::json_pretty(&list)
}
