//! Request execution layer.
//!
//! [`ApiClient`] performs a single HTTP exchange described by an
//! [`ApiRequest`] and returns a [`CallResult`]: the success shape when the
//! status matches the expected one, the shared error payload otherwise.

mod client;
pub mod endpoints;
mod request;
mod result;

pub use client::ApiClient;
pub use request::ApiRequest;
pub use result::CallResult;
