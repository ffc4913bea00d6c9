//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_SESSION_FILE: &str = ".mock-api-session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root; endpoint paths are appended to it.
    pub base_url: String,
    /// Where the file-backed cookie store keeps the session.
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), session_file: PathBuf::from(DEFAULT_SESSION_FILE) }
    }
}

impl ClientConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `MOCK_API_BASE_URL`: default `http://localhost:3001/api`
    /// - `MOCK_API_SESSION_FILE`: default `.mock-api-session.json`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: env_string("MOCK_API_BASE_URL", DEFAULT_BASE_URL),
            session_file: PathBuf::from(env_string("MOCK_API_SESSION_FILE", DEFAULT_SESSION_FILE)),
        }
    }
}

/// Blank values count as unset.
pub(crate) fn env_string(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().to_owned(),
        _ => default.to_owned(),
    }
}
