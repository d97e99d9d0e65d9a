//! Endpoint paths and the authentication wire types.

use serde::{Deserialize, Serialize};

use crate::auth::{AccessToken, RefreshToken};
use crate::types::{BookingId, QuoteListId};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST: exchange username/password for a token pair.
pub const AUTH_TOKEN: &str = "v1/auth/token";

/// POST: exchange a refresh token for a new access token.
pub const AUTH_REFRESH: &str = "v1/auth/refresh";

/// POST: search quotes.
pub const QUOTES: &str = "v2/quotes/";

/// POST: create a booking.
pub const BOOKINGS: &str = "v1/bookings/";

/// POST: register a webhook. GET: current subscription.
pub const WEBHOOKS: &str = "v1/webhooks/";

/// GET: a quote list by id.
pub fn quote_list(id: &QuoteListId) -> String {
    format!("{}{}", QUOTES, id)
}

/// GET: a booking by id.
pub fn booking(id: &BookingId) -> String {
    format!("{}{}", BOOKINGS, id)
}

/// POST: cancel a booking.
pub fn cancel_booking(id: &BookingId) -> String {
    format!("{}{}/cancel/", BOOKINGS, id)
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Request body for the token endpoint.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from the token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: AccessToken,
    pub expires_in: u32,
    pub refresh_token: RefreshToken,
}

/// Request body for the refresh endpoint.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a RefreshToken,
}

/// Response from the refresh endpoint.
///
/// The service does not rotate the refresh token.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access_token: AccessToken,
    pub expires_in: u32,
}
