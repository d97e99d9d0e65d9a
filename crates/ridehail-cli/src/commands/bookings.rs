//! Booking subcommands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use ridehail::api::{BookingRequest, CancelReason, PassengerDetails};
use ridehail::{BookingId, QuoteId};

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct BookingsCommand {
    #[command(subcommand)]
    pub command: BookingsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BookingsSubcommand {
    /// Book a quote for one passenger
    Create(CreateArgs),

    /// Fetch a booking
    Get(GetArgs),

    /// Cancel a booking
    Cancel(CancelArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Quote to book, taken from a quote list
    #[arg(long)]
    pub quote_id: QuoteId,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// Passenger phone number in E.164 form
    #[arg(long)]
    pub phone: String,

    /// Number of luggage items
    #[arg(long, default_value_t = 0)]
    pub luggage: u32,

    /// Free-text note for the driver
    #[arg(long)]
    pub comments: Option<String>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub id: BookingId,
}

#[derive(Args, Debug)]
pub struct CancelArgs {
    pub id: BookingId,

    /// Cancellation reason, e.g. ETA_TOO_LONG
    #[arg(long, default_value_t = CancelReason::default())]
    pub reason: CancelReason,
}

pub async fn handle(settings: &Settings, cmd: BookingsCommand) -> Result<()> {
    match cmd.command {
        BookingsSubcommand::Create(args) => create(settings, args).await,
        BookingsSubcommand::Get(args) => get(settings, args).await,
        BookingsSubcommand::Cancel(args) => cancel(settings, args).await,
    }
}

async fn create(settings: &Settings, args: CreateArgs) -> Result<()> {
    let client = settings.login().await?;

    let passenger = PassengerDetails::new(args.first_name, args.last_name, args.phone);
    let mut request = BookingRequest::new(args.quote_id, passenger, args.luggage);
    if let Some(comments) = args.comments {
        request = request.with_comments(comments);
    }

    let booking = client
        .create_booking(&request)
        .await
        .context("Failed to create booking")?;

    output::success(&format!("Booked {} ({})", booking.id, booking.status));
    output::json_pretty(&booking)
}

async fn get(settings: &Settings, args: GetArgs) -> Result<()> {
    let client = settings.login().await?;

    let booking = client
        .booking(&args.id)
        .await
        .context("Failed to get booking")?;

    output::json_pretty(&booking)
}

async fn cancel(settings: &Settings, args: CancelArgs) -> Result<()> {
    let client = settings.login().await?;

    client
        .cancel_booking(&args.id, args.reason)
        .await
        .context("Failed to cancel booking")?;

    output::success(&format!("Cancelled {}", args.id));
    output::json_pretty(&json!({
        "id": args.id.as_str(),
        "reason": args.reason,
    }))
}
