//! Client Configuration
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::session::{ApiClient, DEFAULT_REFRESH_PATH};
use crate::store::{FileStore, KeyringStore, SessionStore, KEYRING_SERVICE};
use crate::transport::ReqwestTransport;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://api.pointage.example")
    pub api_url: String,

    /// Refresh endpoint path (default: /auth/refresh)
    pub refresh_path: String,

    /// Session file for hosts without a keyring (optional, OS keyring otherwise)
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_url: env::var("PT_API_URL").context("PT_API_URL must be set")?,
            refresh_path: env::var("PT_REFRESH_PATH")
                .unwrap_or_else(|_| DEFAULT_REFRESH_PATH.into()),
            session_file: env::var("PT_SESSION_FILE").ok().map(PathBuf::from),
        })
    }

    /// The configured session store, keyring entries scoped to `api_url`.
    pub fn session_store(&self) -> Result<Box<dyn SessionStore>> {
        Ok(match &self.session_file {
            Some(path) => Box::new(
                FileStore::open(path)
                    .with_context(|| format!("Failed to open session file {}", path.display()))?,
            ),
            None => Box::new(
                KeyringStore::new(KEYRING_SERVICE, &self.api_url)
                    .context("Failed to open keyring")?,
            ),
        })
    }

    /// API client over the configured session store.
    pub fn client(&self) -> Result<ApiClient<ReqwestTransport, Box<dyn SessionStore>>> {
        Ok(ApiClient::from_config(self, self.session_store()?))
    }
}
