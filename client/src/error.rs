//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    /// Re-authentication failed; stored credentials have been cleared.
    #[error("Session expired, please sign in again")]
    SessionExpired,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Session store error: {0}")]
    Store(String),

    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Invalid response body: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
