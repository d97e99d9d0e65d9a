//! Session lifecycle: acquisition, expiry checks and refresh.

use reqwest::StatusCode;
use tracing::{debug, info, instrument};

use crate::clock::{Clock, SystemClock};
use crate::error::Error;
use crate::rest::endpoints::{
    AUTH_REFRESH, AUTH_TOKEN, RefreshRequest, RefreshResponse, TokenRequest, TokenResponse,
};
use crate::rest::{ApiClient, ApiRequest};

use super::credentials::{CredentialSource, Credentials};
use super::session::Session;

/// Acquires sessions and keeps them fresh.
///
/// Each operation makes at most one request. Nothing is retried and a
/// rejected refresh never falls back to logging in again.
#[derive(Debug, Clone)]
pub struct TokenManager<C = SystemClock> {
    client: ApiClient,
    clock: C,
}

impl TokenManager<SystemClock> {
    /// A manager that reads wall-clock time.
    pub fn new(client: ApiClient) -> Self {
        Self::with_clock(client, SystemClock)
    }
}

impl<C: Clock> TokenManager<C> {
    /// A manager that reads time from `clock`.
    pub fn with_clock(client: ApiClient, clock: C) -> Self {
        Self { client, clock }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Authenticate and create a new session.
    ///
    /// # Errors
    ///
    /// [`Error::Auth`] carrying the server's error payload if the token
    /// endpoint does not answer `201 Created`; transport and decode failures
    /// as usual.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn acquire(&self, credentials: &Credentials) -> Result<Session, Error> {
        info!("Acquiring session");

        let body = TokenRequest {
            username: credentials.username(),
            password: credentials.password(),
        };
        let request =
            ApiRequest::post(self.client.url(AUTH_TOKEN), StatusCode::CREATED).json(&body)?;

        let response: TokenResponse =
            self.client.send(request).await?.or_else_wrap(Error::Auth)?;

        let session = Session::new(
            response.access_token,
            response.refresh_token,
            response.expires_in,
            self.clock.now(),
        );

        debug!(expires_at = %session.expires_at(), "Session acquired");
        Ok(session)
    }

    /// Resolve credentials from `source`, then [`acquire`](Self::acquire).
    pub async fn acquire_from(&self, source: &dyn CredentialSource) -> Result<Session, Error> {
        let credentials = source.fetch().await?;
        self.acquire(&credentials).await
    }

    /// Refresh `session` if its access token has expired.
    ///
    /// A session that is still valid is left untouched and no request is made.
    #[instrument(skip(self, session), fields(expires_at = %session.expires_at()))]
    pub async fn ensure_fresh(&self, session: &mut Session) -> Result<(), Error> {
        if !session.is_expired_at(self.clock.now()) {
            return Ok(());
        }

        debug!("Access token expired");
        self.refresh(session).await
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// On success the access token, lifetime and expiry are replaced and the
    /// refresh token is kept. On failure `session` is unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::Refresh`] carrying the server's error payload if the refresh
    /// endpoint does not answer `201 Created`.
    #[instrument(skip(self, session))]
    pub async fn refresh(&self, session: &mut Session) -> Result<(), Error> {
        info!("Refreshing session");

        let body = RefreshRequest {
            refresh_token: session.refresh_token(),
        };
        let request =
            ApiRequest::post(self.client.url(AUTH_REFRESH), StatusCode::CREATED).json(&body)?;

        let response: RefreshResponse =
            self.client.send(request).await?.or_else_wrap(Error::Refresh)?;

        session.apply_refresh(response.access_token, response.expires_in, self.clock.now());

        debug!(expires_at = %session.expires_at(), "Session refreshed successfully");
        Ok(())
    }
}
