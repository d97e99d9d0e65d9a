//! Validated primitive types.
//!
//! These types enforce their invariants at construction time so that a value
//! that reaches a request path or base URL is always well formed.

mod api_url;
mod id;

pub use api_url::{ApiUrl, DEFAULT_API_URL};
pub use id::{BookingId, QuoteId, QuoteListId};
