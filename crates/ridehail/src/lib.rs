//! ridehail - client for a ride-hailing-as-a-service REST API
//!
//! The library is built around an authenticated request layer: a
//! [`TokenManager`] acquires and refreshes a [`Session`], and an
//! [`ApiClient`] performs single calls whose responses are decoded either as
//! the operation's success shape or as the service's [`ApiError`] payload,
//! depending on the status code.
//!
//! # Example
//!
//! ```no_run
//! use ridehail::{ApiUrl, Client, Credentials};
//! use ridehail::api::{Geolocation, QuoteSearch};
//!
//! # async fn example() -> Result<(), ridehail::Error> {
//! let api = ApiUrl::new("https://rest.sandbox.karhoo.com")?;
//! let credentials = Credentials::new("ops@example.com", "password");
//! let client = Client::login(&api, &credentials).await?;
//!
//! let search = QuoteSearch::asap(
//!     Geolocation::new("50.037933", "8.562152", "Frankfurt Airport"),
//!     Geolocation::new("51.037933", "8.910231", "Some place nearby"),
//! );
//! let quotes = client.search_quotes(&search).await?;
//! for quote in &quotes.quotes {
//!     println!("{} {} {}", quote.id, quote.price.low, quote.price.currency_code);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod clock;
mod de;
pub mod error;
pub mod rest;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{
    AccessToken, CredentialSource, Credentials, RefreshToken, Session, SharedSession,
    StaticCredentials, TokenManager, YamlCredentialFile,
};
pub use client::Client;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ApiError, ApiErrorDetail, Error};
pub use rest::{ApiClient, ApiRequest, CallResult};
pub use types::{ApiUrl, BookingId, QuoteId, QuoteListId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
