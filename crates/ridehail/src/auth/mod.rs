//! Authentication types and session management.
//!
//! Sessions are acquired and refreshed by a [`TokenManager`]; the resulting
//! [`Session`] is a plain value owned by the caller.

mod credentials;
mod manager;
mod session;
mod tokens;

pub use credentials::{CredentialSource, Credentials, StaticCredentials, YamlCredentialFile};
pub use manager::TokenManager;
pub use session::{Session, SharedSession};
pub use tokens::{AccessToken, RefreshToken};
