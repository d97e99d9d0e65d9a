//! Webhook subcommands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use ridehail::api::WebhookRegistration;

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct WebhooksCommand {
    #[command(subcommand)]
    pub command: WebhooksSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum WebhooksSubcommand {
    /// Register the URL that receives booking events
    Register(RegisterArgs),

    /// Show the registered webhook
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub url: String,

    /// Secret the service signs events with
    #[arg(long, env = "RIDEHAIL_WEBHOOK_SECRET", hide_env_values = true)]
    pub secret: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {}

pub async fn handle(settings: &Settings, cmd: WebhooksCommand) -> Result<()> {
    match cmd.command {
        WebhooksSubcommand::Register(args) => register(settings, args).await,
        WebhooksSubcommand::List(_) => list(settings).await,
    }
}

async fn register(settings: &Settings, args: RegisterArgs) -> Result<()> {
    let client = settings.login().await?;

    client
        .register_webhook(&WebhookRegistration::new(&args.url, args.secret))
        .await
        .context("Failed to register webhook")?;

    output::success(&format!("Registered webhook {}", args.url));
    Ok(())
}

async fn list(settings: &Settings) -> Result<()> {
    let client = settings.login().await?;

    let subscription = client
        .webhook_subscription()
        .await
        .context("Failed to get webhook subscription")?;

    output::json_pretty(&subscription)
}
