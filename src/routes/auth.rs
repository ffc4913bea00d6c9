//! Login route. Accepts any non-empty credential pair.

use axum::body::Bytes;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AppError;

const TOKEN_PREFIX: &str = "mock-jwt-token-";

/// Login body. Fields are optional so a missing field maps to 400, not 422.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Both fields, when present and non-empty.
    fn credentials(self) -> Option<(String, String)> {
        let email = self.email.filter(|value| !value.is_empty())?;
        let password = self.password.filter(|value| !value.is_empty())?;
        Some((email, password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// Lenient body parse: an empty, malformed, or mistyped body counts as empty
/// credentials rather than a framework rejection.
pub(crate) fn parse_login_request(body: &[u8]) -> LoginRequest {
    serde_json::from_slice(body).unwrap_or_default()
}

/// Fake session token: fixed prefix plus epoch milliseconds.
pub(crate) fn mock_token(now: OffsetDateTime) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    format!("{TOKEN_PREFIX}{millis}")
}

/// `POST /api/login`: echo the email back with a fresh mock token.
pub async fn login(body: Bytes) -> Result<Json<LoginResponse>, AppError> {
    let Some((email, _password)) = parse_login_request(&body).credentials() else {
        tracing::debug!("login rejected: missing credentials");
        return Err(AppError::MissingCredentials);
    };

    let token = mock_token(OffsetDateTime::now_utc());
    tracing::info!(%email, "login accepted");
    Ok(Json(LoginResponse { token, user: LoginUser { email } }))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
