//! HTTP client that executes [`ApiRequest`]s.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use crate::error::{ApiError, DecodeError, DecodeTarget, Error};
use crate::types::ApiUrl;

use super::request::ApiRequest;
use super::result::CallResult;

const APPLICATION_JSON: &str = "application/json";

/// Performs one HTTP exchange per call and classifies the response by status.
///
/// The client never retries and has no timeout configured; a hung connection
/// blocks the calling future until it is dropped.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: ApiUrl,
}

impl ApiClient {
    /// Create a new client for the given API base URL.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialised.
    pub fn new(base: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ridehail/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Create a client that reuses an existing `reqwest::Client`.
    pub fn with_http_client(base: ApiUrl, client: reqwest::Client) -> Self {
        Self { client, base }
    }

    /// Returns the API base URL this client is configured for.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Absolute URL of an endpoint path.
    pub fn url(&self, path: &str) -> String {
        self.base.endpoint(path)
    }

    /// Execute `request` and decode the body as `R` when the status matches
    /// the expected one, or as an [`ApiError`] otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] if the exchange could not be completed and
    /// [`Error::Decode`] if either body is not the JSON shape it should be.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn send<R>(&self, request: ApiRequest) -> Result<CallResult<R>, Error>
    where
        R: DeserializeOwned,
    {
        let response = self.dispatch(&request).await?;
        let status = response.status();

        if status != request.expected {
            return self.decode_failure(response).await.map(CallResult::Failure);
        }

        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body).map_err(|source| DecodeError {
            status: status.as_u16(),
            target: DecodeTarget::Success,
            source,
        })?;

        Ok(CallResult::Success(value))
    }

    /// Execute `request` for an operation whose success carries no body.
    ///
    /// On a matching status the body is never read, so an empty or absent
    /// body is fine.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn send_no_content(&self, request: ApiRequest) -> Result<CallResult<()>, Error> {
        let response = self.dispatch(&request).await?;

        if response.status() == request.expected {
            return Ok(CallResult::Success(()));
        }

        self.decode_failure(response).await.map(CallResult::Failure)
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<reqwest::Response, Error> {
        debug!(expected = %request.expected, authed = request.bearer.is_some(), "API request");

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(ACCEPT, HeaderValue::from_static(APPLICATION_JSON))
            .header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        trace!(status = %response.status(), "API response");
        Ok(response)
    }

    /// Decode a response whose status did not match as the shared error payload.
    async fn decode_failure(&self, response: reqwest::Response) -> Result<ApiError, Error> {
        let status: StatusCode = response.status();
        let body = response.bytes().await?;

        let error: ApiError = serde_json::from_slice(&body).map_err(|source| DecodeError {
            status: status.as_u16(),
            target: DecodeTarget::ApiError,
            source,
        })?;

        debug!(%status, code = %error.code, "API returned error payload");
        Ok(error)
    }
}
