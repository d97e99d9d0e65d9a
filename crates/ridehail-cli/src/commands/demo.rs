//! End-to-end demo: webhook, quotes, booking and cancellation in one run.

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;

use ridehail::api::{
    BookingDetails, BookingRequest, CancelReason, Geolocation, PassengerDetails, QuoteSearch,
    QuotesList, WebhookRegistration, WebhookSubscription,
};
use ridehail::{BookingId, QuoteId};

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// URL that receives booking events
    #[arg(long)]
    pub webhook_url: String,

    /// Secret the service signs events with
    #[arg(long, env = "RIDEHAIL_WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: String,

    #[arg(long, default_value = "Chuoxian")]
    pub first_name: String,

    #[arg(long, default_value = "Yang")]
    pub last_name: String,

    #[arg(long, default_value = "+15005550006")]
    pub phone: String,

    #[arg(long, default_value_t = 1)]
    pub luggage: u32,

    #[arg(long, default_value_t = CancelReason::default())]
    pub reason: CancelReason,
}

/// Everything the demo saw, printed once at the end.
#[derive(Debug, Serialize)]
struct DemoReport {
    webhook: WebhookSubscription,
    quote_list: QuotesList,
    booking: BookingDetails,
    cancelled: String,
}

fn route() -> (Geolocation, Geolocation) {
    (
        Geolocation::new("50.037933", "8.562152", "Frankfurt Airport"),
        Geolocation::new("51.037933", "8.910231", "Some place nearby"),
    )
}

pub async fn run(settings: &Settings, args: DemoArgs) -> Result<()> {
    output::step("Authenticating...");
    let client = settings.login().await?;

    client
        .session()
        .fresh_access_token(client.token_manager())
        .await
        .context("Failed to refresh access token")?;

    output::step("Registering webhook...");
    client
        .register_webhook(&WebhookRegistration::new(
            &args.webhook_url,
            &args.webhook_secret,
        ))
        .await
        .context("Failed to register webhook")?;

    let webhook = client
        .webhook_subscription()
        .await
        .context("Failed to get webhook subscription")?;
    output::field("Webhook", &webhook.url);

    output::step("Requesting quotes...");
    let (origin, destination) = route();
    let searched = client
        .search_quotes(&QuoteSearch::asap(origin, destination))
        .await
        .context("Failed to search quotes")?;

    let quote_list = client
        .quote_list(&searched.list_id()?)
        .await
        .context("Failed to get quote list")?;

    let Some(first) = quote_list.quotes.first() else {
        bail!("No quotes available for quote list {}", quote_list.id);
    };
    output::field("Quote", &first.id);

    output::step("Booking the first quote...");
    let request = BookingRequest::new(
        QuoteId::new(first.id.clone()).context("Invalid quote id")?,
        PassengerDetails::new(&args.first_name, &args.last_name, &args.phone),
        args.luggage,
    );
    let booked = client
        .create_booking(&request)
        .await
        .context("Failed to create booking")?;

    let booking_id: BookingId = booked.booking_id().context("Invalid booking id")?;
    let booking = client
        .booking(&booking_id)
        .await
        .context("Failed to get booking")?;
    output::field("Booking", &format!("{} ({})", booking.id, booking.status));

    output::step("Cancelling booking...");
    client
        .cancel_booking(&booking_id, args.reason)
        .await
        .context("Failed to cancel booking")?;

    output::success(&format!("Booking {} cancelled", booking_id));

    output::json_pretty(&DemoReport {
        webhook,
        quote_list,
        booking,
        cancelled: booking_id.to_string(),
    })
}
