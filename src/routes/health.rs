//! Health check route.

use axum::response::Json;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-02T03:04:05.678Z`.
pub(crate) fn iso_timestamp(now: OffsetDateTime) -> Result<String, time::error::Format> {
    now.to_offset(UtcOffset::UTC)
        .format(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"))
}

/// `GET /api/health`
pub async fn health() -> Result<Json<HealthResponse>, AppError> {
    let timestamp = iso_timestamp(OffsetDateTime::now_utc()).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(HealthResponse { status: "OK".to_owned(), timestamp }))
}

#[cfg(test)]
#[path = "health_test.rs"]
mod tests;
