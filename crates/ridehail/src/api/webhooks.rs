//! Webhook registration.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::Client;
use crate::clock::Clock;
use crate::error::Error;
use crate::rest::ApiRequest;
use crate::rest::endpoints::WEBHOOKS;

/// Request body to register a webhook.
///
/// The shared secret is redacted from Debug output.
#[derive(Clone, Serialize)]
pub struct WebhookRegistration {
    pub url: String,
    pub shared_secret: String,
}

impl WebhookRegistration {
    pub fn new(url: impl Into<String>, shared_secret: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            shared_secret: shared_secret.into(),
        }
    }
}

impl fmt::Debug for WebhookRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookRegistration")
            .field("url", &self.url)
            .field("shared_secret", &"[REDACTED]")
            .finish()
    }
}

/// The webhook currently registered for the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSubscription {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub url: String,
}

impl<C: Clock> Client<C> {
    /// Register (or replace) the account's webhook.
    #[instrument(skip(self, registration), fields(url = %registration.url))]
    pub async fn register_webhook(
        &self,
        registration: &WebhookRegistration,
    ) -> Result<(), Error> {
        debug!("Registering webhook");

        let request =
            ApiRequest::post(self.url(WEBHOOKS), StatusCode::CREATED).json(registration)?;
        self.send_authed_no_content(request).await?.into_result()
    }

    /// Return the account's current webhook subscription.
    #[instrument(skip(self))]
    pub async fn webhook_subscription(&self) -> Result<WebhookSubscription, Error> {
        debug!("Getting webhook subscription");

        let request = ApiRequest::get(self.url(WEBHOOKS), StatusCode::OK);
        self.send_authed(request).await?.into_result()
    }
}
