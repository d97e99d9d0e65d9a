//! Resolved command-line configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use ridehail::{ApiClient, ApiUrl, Client, TokenManager, YamlCredentialFile};

const CREDENTIALS_FILE: &str = "credentials.yml";

/// Where to connect and which credentials to use.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiUrl,
    pub credentials: PathBuf,
}

impl Settings {
    /// Apply defaults to the values given on the command line.
    pub fn resolve(api_url: Option<&str>, credentials: Option<PathBuf>) -> Result<Self> {
        let api = match api_url {
            Some(url) => ApiUrl::new(url).context("Invalid API URL")?,
            None => ApiUrl::default(),
        };

        let credentials = match credentials {
            Some(path) => path,
            None => default_credentials_path()?,
        };

        Ok(Self { api, credentials })
    }

    /// Authenticate and return a client holding the new session.
    pub async fn login(&self) -> Result<Client> {
        debug!(api = %self.api, credentials = %self.credentials.display(), "Logging in");

        let tokens = TokenManager::new(ApiClient::new(self.api.clone()));
        let source = YamlCredentialFile::new(&self.credentials);

        Client::login_from(tokens, &source)
            .await
            .context("Failed to authenticate")
    }
}

fn default_credentials_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "ridehail").context("Could not determine config directory")?;
    Ok(dirs.config_dir().join(CREDENTIALS_FILE))
}
