//! Description of one outbound API call.

use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::auth::AccessToken;
use crate::error::Error;

/// Everything [`ApiClient`](super::ApiClient) needs to perform a call:
/// method, absolute URL, optional bearer token, optional JSON body and the
/// status that counts as success.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) bearer: Option<AccessToken>,
    pub(crate) body: Option<Vec<u8>>,
    pub(crate) expected: StatusCode,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>, expected: StatusCode) -> Self {
        Self {
            method,
            url: url.into(),
            bearer: None,
            body: None,
            expected,
        }
    }

    /// A GET request.
    pub fn get(url: impl Into<String>, expected: StatusCode) -> Self {
        Self::new(Method::GET, url, expected)
    }

    /// A POST request.
    pub fn post(url: impl Into<String>, expected: StatusCode) -> Self {
        Self::new(Method::POST, url, expected)
    }

    /// Attach `Authorization: Bearer <token>`.
    pub fn bearer(mut self, token: &AccessToken) -> Self {
        self.bearer = Some(token.clone());
        self
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the value cannot be encoded. No
    /// network I/O has happened at that point.
    pub fn json<B>(mut self, body: &B) -> Result<Self, Error>
    where
        B: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(body).map_err(Error::Serialization)?;
        self.body = Some(bytes);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The status that selects the success decode path.
    pub fn expected_status(&self) -> StatusCode {
        self.expected
    }

    /// The encoded request body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn has_bearer(&self) -> bool {
        self.bearer.is_some()
    }
}
