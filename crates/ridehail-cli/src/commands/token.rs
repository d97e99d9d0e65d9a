//! Token command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct TokenArgs {}

/// Token lifetime as printed on stdout. The tokens themselves are never shown.
#[derive(Debug, Serialize)]
struct TokenInfo {
    expires_in: u32,
    expires_at: String,
}

pub async fn run(settings: &Settings, _args: TokenArgs) -> Result<()> {
    output::step("Authenticating...");

    let client = settings.login().await?;
    let session = client.session_snapshot().await;

    output::success("Authenticated");
    output::field("API", settings.api.as_str());

    output::json_pretty(&TokenInfo {
        expires_in: session.expires_in(),
        expires_at: session.expires_at().to_rfc3339(),
    })
}
