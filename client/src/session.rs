//! Authenticated API client.
//!
//! Session policy:
//! - The stored access token is attached to every request as a bearer
//!   credential.
//! - A 401 on any request except the refresh call triggers exactly one
//!   refresh. On success the new token is stored and the original request is
//!   retried once; the retry's response is returned as-is.
//! - A failed refresh clears the stored session and surfaces
//!   [`ClientError::SessionExpired`], forcing the caller to sign in again.
//! - A 401 on the refresh call itself is returned without retrying.
//! - Concurrent 401s for the same token share one refresh: a request whose
//!   token was already replaced retries with the new one.

use pt_common::CurrentUser;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::store::{SessionKey, SessionStore};
use crate::transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};

pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";
pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const ME_PATH: &str = "/auth/me";

/// Sign-in credentials.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token response from the login and refresh endpoints.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct ApiClient<T, S> {
    transport: T,
    store: S,
    refresh_path: String,
    // Serializes refreshes triggered by concurrent 401s.
    refresh_lock: Mutex<()>,
}

impl<S: SessionStore> ApiClient<ReqwestTransport, S> {
    /// Client for `config.api_url` using `config.refresh_path`.
    pub fn from_config(config: &ClientConfig, store: S) -> Self {
        Self::new(ReqwestTransport::new(&config.api_url), store)
            .with_refresh_path(config.refresh_path.clone())
    }
}

impl<T: Transport, S: SessionStore> ApiClient<T, S> {
    pub fn new(transport: T, store: S) -> Self {
        Self {
            transport,
            store,
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            refresh_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub fn refresh_path(&self) -> &str {
        &self.refresh_path
    }

    // === Requests ===

    /// Sends a request under the session policy described at module level.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse> {
        let bearer = self.store.load(SessionKey::AccessToken)?;
        let response = self
            .execute_with(method, path, body.clone(), bearer.clone())
            .await?;
        if !response.is_unauthorized() || path == self.refresh_path {
            return Ok(response);
        }

        info!(path, "Access token rejected, refreshing session");
        self.refresh_after(bearer.as_deref()).await?;
        self.execute(method, path, body).await
    }

    /// `GET` and deserialize a 2xx body.
    pub async fn get_json<R: serde::de::DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.send(Method::Get, path, None).await?.json()
    }

    /// `POST` a JSON body and deserialize a 2xx body.
    pub async fn post_json<B: Serialize + Sync, R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        let body = serde_json::to_value(body)?;
        self.send(Method::Post, path, Some(body)).await?.json()
    }

    /// Obtains a new access token from the refresh endpoint.
    ///
    /// Any failure clears the stored session.
    pub async fn refresh(&self) -> Result<()> {
        let current = self.store.load(SessionKey::AccessToken)?;
        self.refresh_after(current.as_deref()).await
    }

    /// Refreshes unless the `rejected` token was already replaced while
    /// waiting for the lock.
    async fn refresh_after(&self, rejected: Option<&str>) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.store.load(SessionKey::AccessToken)?;
        if current.as_deref() != rejected {
            return if current.is_some() {
                debug!("Session already refreshed");
                Ok(())
            } else {
                Err(ClientError::SessionExpired)
            };
        }

        let outcome = match self.execute(Method::Post, &self.refresh_path, None).await {
            Ok(response) => response.json::<TokenResponse>(),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(tokens) => {
                self.store.save(SessionKey::AccessToken, &tokens.access_token)?;
                info!("Session refreshed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Session refresh failed, signing out");
                self.store.clear()?;
                Err(ClientError::SessionExpired)
            }
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse> {
        let bearer = self.store.load(SessionKey::AccessToken)?;
        self.execute_with(method, path, body, bearer).await
    }

    async fn execute_with(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<String>,
    ) -> Result<ApiResponse> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            body,
            bearer,
        };
        self.transport.execute(&request).await
    }

    // === Session ===

    /// Signs in, then stores the access token and the current-user record.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<CurrentUser> {
        let request = ApiRequest {
            method: Method::Post,
            path: LOGIN_PATH.to_string(),
            body: Some(serde_json::to_value(credentials)?),
            bearer: None,
        };
        let response = self.transport.execute(&request).await?;
        if response.is_unauthorized() {
            warn!(email = %credentials.email, "Login rejected");
            return Err(ClientError::InvalidCredentials);
        }
        let tokens: TokenResponse = response.json()?;
        self.store.save(SessionKey::AccessToken, &tokens.access_token)?;

        debug!("Login successful, fetching user info");
        let user: CurrentUser = match self.get_json(ME_PATH).await {
            Ok(user) => user,
            Err(e) => {
                self.store.clear()?;
                return Err(e);
            }
        };
        self.store
            .save(SessionKey::CurrentUser, &serde_json::to_string(&user)?)?;

        info!(user_id = %user.id, role = %user.role, "User signed in");
        Ok(user)
    }

    /// Signs out. The stored session is cleared even if the server call fails.
    pub async fn logout(&self) -> Result<()> {
        if self.store.load(SessionKey::AccessToken)?.is_some() {
            if let Err(e) = self.execute(Method::Post, LOGOUT_PATH, None).await {
                warn!(error = %e, "Logout request failed");
            }
        }
        self.store.clear()?;
        info!("User signed out");
        Ok(())
    }

    /// The stored current-user record.
    pub fn current_user(&self) -> Result<CurrentUser> {
        let json = self
            .store
            .load(SessionKey::CurrentUser)?
            .ok_or(ClientError::NotAuthenticated)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.store.load(SessionKey::AccessToken)?.is_some())
    }
}
