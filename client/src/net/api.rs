//! REST API client for the mock item API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthApi` and `ItemsApi` are the seams the stores depend on. `ApiClient`
//! is the `reqwest` implementation; tests substitute in-memory fakes.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become `ApiError::Status`, carrying the server's
//! `{error}` message when present and a generic failure line otherwise.
//! Nothing is retried.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::types::{ErrorBody, HealthResponse, Item, LoginRequest, LoginResponse};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, reset, ...).
    #[error("http request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status, when the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Credential exchange against `POST /login`.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with status 400 when a field is empty, or a
    /// transport error when the server is unreachable.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
}

/// Catalog fetch against `GET /items`.
#[async_trait]
pub trait ItemsApi: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an
    /// unparseable body.
    async fn get_items(&self) -> Result<Vec<Item>, ApiError>;
}

pub(crate) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub(crate) fn failure_message(url: &str, status: StatusCode) -> String {
    format!(
        "Http failure response for {url}: {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Error")
    )
}

/// Pull the server's `{error}` message out of a failure body.
pub(crate) fn server_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error)
        .into_iter()
        .find(|message| !message.is_empty())
}

/// HTTP client bound to one API base URL (e.g. `http://localhost:3001/api`).
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the server is unreachable or unhealthy.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = endpoint_url(&self.base_url, "health");
        let resp = self.http.get(&url).send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        decode(&url, resp).await
    }
}

async fn decode<T: DeserializeOwned>(url: &str, resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = server_error_message(&body).unwrap_or_else(|| failure_message(url, status));
        tracing::debug!(%url, status = status.as_u16(), %message, "api request failed");
        return Err(ApiError::Status { status: status.as_u16(), message });
    }
    resp.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = endpoint_url(&self.base_url, "login");
        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        decode(&url, resp).await
    }
}

#[async_trait]
impl ItemsApi for ApiClient {
    async fn get_items(&self) -> Result<Vec<Item>, ApiError> {
        let url = endpoint_url(&self.base_url, "items");
        let resp = self.http.get(&url).send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        decode(&url, resp).await
    }
}
