//! Login credentials and the sources they are loaded from.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{CredentialsError, Error};

/// Username and password used to mint a session.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use ridehail::Credentials;
///
/// let creds = Credentials::new("ops@example.com", "hunter2");
/// assert_eq!(creds.username(), "ops@example.com");
/// ```
#[derive(Clone, Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    fn ensure_complete(self) -> Result<Self, CredentialsError> {
        if self.username.trim().is_empty() {
            return Err(CredentialsError::Missing { field: "username" });
        }
        if self.password.is_empty() {
            return Err(CredentialsError::Missing { field: "password" });
        }
        Ok(self)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Supplies the username/password pair for [`TokenManager::acquire`].
///
/// [`TokenManager::acquire`]: crate::auth::TokenManager::acquire
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Resolve the credentials.
    async fn fetch(&self) -> Result<Credentials, Error>;
}

/// Credentials already held in memory.
#[derive(Debug, Clone)]
pub struct StaticCredentials(Credentials);

impl StaticCredentials {
    pub fn new(credentials: Credentials) -> Self {
        Self(credentials)
    }
}

#[async_trait]
impl CredentialSource for StaticCredentials {
    async fn fetch(&self) -> Result<Credentials, Error> {
        Ok(self.0.clone())
    }
}

/// A YAML file holding `username` and `password` keys.
///
/// ```yaml
/// username: ops@example.com
/// password: hunter2
/// ```
#[derive(Debug, Clone)]
pub struct YamlCredentialFile {
    path: PathBuf,
}

impl YamlCredentialFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse credentials from YAML text. `origin` is only used in errors.
    pub fn parse(contents: &str, origin: &str) -> Result<Credentials, CredentialsError> {
        let credentials: Credentials =
            serde_yaml::from_str(contents).map_err(|source| CredentialsError::Parse {
                path: origin.to_string(),
                source,
            })?;
        credentials.ensure_complete()
    }
}

#[async_trait]
impl CredentialSource for YamlCredentialFile {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Credentials, Error> {
        let origin = self.path.display().to_string();
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| CredentialsError::Io {
                    path: origin.clone(),
                    source,
                })?;

        let credentials = Self::parse(&contents, &origin)?;
        debug!(username = %credentials.username(), "Loaded credentials");
        Ok(credentials)
    }
}
