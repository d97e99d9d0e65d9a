//! Error types for the ridehail library.
//!
//! Server-side rejections and local failures are kept apart: an [`ApiError`]
//! is what the service said, every other variant means the call could not be
//! completed or its response could not be understood.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The unified error type for ridehail operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The token endpoint rejected the credentials.
    #[error("authentication failed: {0}")]
    Auth(ApiError),

    /// The refresh endpoint rejected the refresh token.
    #[error("token refresh failed: {0}")]
    Refresh(ApiError),

    /// A resource endpoint answered with something other than the expected status.
    #[error("API error: {0}")]
    Api(ApiError),

    /// Network transport errors (DNS, TLS, connection).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response body did not match the shape expected for its status.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// An outbound request body could not be encoded.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Input validation errors (base URL, identifiers).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The credential source could not produce a username/password pair.
    #[error("credentials unavailable: {0}")]
    Credentials(#[from] CredentialsError),
}

impl Error {
    /// Returns the server-reported error, if this failure carries one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Auth(e) | Error::Refresh(e) | Error::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Structured error payload returned by the service on any unexpected status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiError {
    /// Machine-readable error code (e.g. `not_found`).
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub code: String,
    /// Human-readable summary.
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub message: String,
    /// Additional per-field details, in server order.
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub details: Vec<ApiErrorDetail>,
}

/// A single entry of [`ApiError::details`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorDetail {
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub detail: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.code.is_empty() {
            write!(f, "[{}] ", self.code)?;
        }
        write!(f, "{}", self.message)?;
        for detail in &self.details {
            write!(f, "; {}: {}", detail.message, detail.detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The request could not be built (bad header value, bad URL).
    #[error("invalid request: {message}")]
    Request { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_builder() {
            TransportError::Request {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Which decode branch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeTarget {
    /// The success shape of the operation.
    Success,
    /// The shared error payload.
    ApiError,
}

impl fmt::Display for DecodeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeTarget::Success => f.write_str("success body"),
            DecodeTarget::ApiError => f.write_str("error body"),
        }
    }
}

/// A response body that did not match its expected JSON shape.
#[derive(Debug, Error)]
#[error("malformed {target} (HTTP {status}): {source}")]
pub struct DecodeError {
    /// Observed HTTP status code.
    pub status: u16,
    /// Branch that was being decoded.
    pub target: DecodeTarget,
    #[source]
    pub source: serde_json::Error,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid resource identifier.
    #[error("invalid {kind} '{value}': {reason}")]
    Id {
        kind: &'static str,
        value: String,
        reason: String,
    },

    /// Unknown cancellation reason.
    #[error("unknown cancellation reason '{value}'")]
    CancelReason { value: String },
}

/// Failures while resolving credentials.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// The credentials file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The credentials file is not valid YAML of the expected shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A required field is empty.
    #[error("{field} is empty")]
    Missing { field: &'static str },
}
