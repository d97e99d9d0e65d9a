//! Authenticated client bundling a token manager and a session.

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::auth::{
    AccessToken, CredentialSource, Credentials, Session, SharedSession, TokenManager,
};
use crate::clock::{Clock, SystemClock};
use crate::error::Error;
use crate::rest::{ApiClient, ApiRequest, CallResult};
use crate::types::ApiUrl;

/// Entry point for resource operations.
///
/// Every call first makes sure the session's access token is still valid
/// (refreshing it once if it has expired) and then sends the request with
/// that token. If the refresh fails, the request is not sent.
///
/// # Example
///
/// ```no_run
/// use ridehail::{ApiUrl, Client, Credentials};
/// use ridehail::api::WebhookRegistration;
///
/// # async fn example() -> Result<(), ridehail::Error> {
/// let api = ApiUrl::default();
/// let client = Client::login(&api, &Credentials::new("ops@example.com", "pw")).await?;
///
/// client
///     .register_webhook(&WebhookRegistration::new("https://hooks.example.com/ride", "s3cret"))
///     .await?;
/// println!("{}", client.webhook_subscription().await?.url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<C = SystemClock> {
    tokens: TokenManager<C>,
    session: SharedSession,
}

impl Client<SystemClock> {
    /// Authenticate against `api` and build a client around the new session.
    pub async fn login(api: &ApiUrl, credentials: &Credentials) -> Result<Self, Error> {
        Self::login_with(TokenManager::new(ApiClient::new(api.clone())), credentials).await
    }
}

impl<C: Clock> Client<C> {
    /// Authenticate using an existing token manager.
    pub async fn login_with(
        tokens: TokenManager<C>,
        credentials: &Credentials,
    ) -> Result<Self, Error> {
        let session = tokens.acquire(credentials).await?;
        Ok(Self::from_session(tokens, session))
    }

    /// Authenticate with credentials resolved from `source`.
    pub async fn login_from(
        tokens: TokenManager<C>,
        source: &dyn CredentialSource,
    ) -> Result<Self, Error> {
        let session = tokens.acquire_from(source).await?;
        Ok(Self::from_session(tokens, session))
    }

    /// Wrap an already acquired session.
    pub fn from_session(tokens: TokenManager<C>, session: impl Into<SharedSession>) -> Self {
        Self {
            tokens,
            session: session.into(),
        }
    }

    pub fn token_manager(&self) -> &TokenManager<C> {
        &self.tokens
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// A copy of the current session state.
    pub async fn session_snapshot(&self) -> Session {
        self.session.snapshot().await
    }

    /// Absolute URL of an endpoint path.
    pub fn url(&self, path: &str) -> String {
        self.tokens.client().url(path)
    }

    /// Send `request` with a fresh bearer token and decode the success body as `R`.
    #[instrument(skip(self, request), fields(url = %request.url()))]
    pub async fn send_authed<R>(&self, request: ApiRequest) -> Result<CallResult<R>, Error>
    where
        R: DeserializeOwned,
    {
        let token = self.bearer().await?;
        self.tokens.client().send(request.bearer(&token)).await
    }

    /// Send `request` with a fresh bearer token for an operation without a
    /// success body.
    #[instrument(skip(self, request), fields(url = %request.url()))]
    pub async fn send_authed_no_content(
        &self,
        request: ApiRequest,
    ) -> Result<CallResult<()>, Error> {
        let token = self.bearer().await?;
        self.tokens.client().send_no_content(request.bearer(&token)).await
    }

    async fn bearer(&self) -> Result<AccessToken, Error> {
        self.session.fresh_access_token(&self.tokens).await
    }
}
