//! HTTP transport abstraction.
//!
//! [`crate::ApiClient`] owns the session policy; a [`Transport`] only moves
//! one request and reports the status it got back. Non-2xx statuses are
//! responses, not errors.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

/// Outbound request, path relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    /// Bearer credential attached as `Authorization: Bearer <token>`
    pub bearer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub const UNAUTHORIZED: u16 = 401;

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// The credential was missing, invalid or expired.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status == Self::UNAUTHORIZED
    }

    /// Deserializes a 2xx body; any other status is [`ClientError::Status`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.is_success() {
            return Err(self.status_error());
        }
        Ok(serde_json::from_str(&self.body)?)
    }

    #[must_use]
    pub fn status_error(&self) -> ClientError {
        ClientError::Status {
            status: self.status,
            body: self.body.clone(),
        }
    }
}

/// Executes one request.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &ApiRequest) -> impl Future<Output = Result<ApiResponse>> + Send;
}

/// [`Transport`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.into(), &url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(method = ?request.method, path = %request.path, status, "API response");

        Ok(ApiResponse { status, body })
    }
}
