//! Session state: the current token pair and when the access token expires.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::error::Error;

use super::manager::TokenManager;
use super::tokens::{AccessToken, RefreshToken};

/// An authenticated session.
///
/// Holds the access token, the refresh token, the lifetime the server granted
/// and the absolute instant the access token stops being valid. The expiry
/// instant is always `issued_at + expires_in`.
///
/// A `Session` is a plain value owned by the caller. It is only mutated by
/// [`TokenManager::refresh`] / [`TokenManager::ensure_fresh`]. Use
/// [`SharedSession`] when several tasks need the same session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: AccessToken,
    refresh_token: RefreshToken,
    expires_in: u32,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a token pair issued at `issued_at`.
    pub fn new(
        access_token: AccessToken,
        refresh_token: RefreshToken,
        expires_in: u32,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
            expires_at: expiry(issued_at, expires_in),
        }
    }

    /// Returns the current access token.
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the refresh token.
    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }

    /// Lifetime in seconds granted with the current access token.
    pub fn expires_in(&self) -> u32 {
        self.expires_in
    }

    /// Instant at which the current access token expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the access token is expired at `now`.
    ///
    /// There is no early-refresh margin: a token is usable up to, but not
    /// including, its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Replace the access token after a refresh. The refresh token is kept.
    pub(crate) fn apply_refresh(
        &mut self,
        access_token: AccessToken,
        expires_in: u32,
        issued_at: DateTime<Utc>,
    ) {
        self.access_token = access_token;
        self.expires_in = expires_in;
        self.expires_at = expiry(issued_at, expires_in);
    }
}

fn expiry(issued_at: DateTime<Utc>, expires_in: u32) -> DateTime<Utc> {
    issued_at + TimeDelta::seconds(i64::from(expires_in))
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("tokens", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// A session shared between tasks.
///
/// Checking expiry, refreshing and reading the access token happen under one
/// lock, so concurrent callers never refresh twice or observe a token that is
/// halfway through being replaced.
///
/// Cheap to clone; clones refer to the same session.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Refresh the session if it has expired, then return the access token.
    ///
    /// # Errors
    ///
    /// Propagates the refresh failure; the caller must not issue the
    /// dependent request.
    pub async fn fresh_access_token<C: Clock>(
        &self,
        manager: &TokenManager<C>,
    ) -> Result<AccessToken, Error> {
        let mut session = self.inner.lock().await;
        manager.ensure_fresh(&mut session).await?;
        Ok(session.access_token().clone())
    }

    /// Refresh unconditionally.
    pub async fn refresh<C: Clock>(&self, manager: &TokenManager<C>) -> Result<(), Error> {
        let mut session = self.inner.lock().await;
        manager.refresh(&mut session).await
    }

    /// A copy of the current session state.
    pub async fn snapshot(&self) -> Session {
        self.inner.lock().await.clone()
    }
}

impl From<Session> for SharedSession {
    fn from(session: Session) -> Self {
        Self::new(session)
    }
}

impl std::fmt::Debug for SharedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSession").finish_non_exhaustive()
    }
}
