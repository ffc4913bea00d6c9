//! Client-side cookie persistence for the auth session.
//!
//! DESIGN
//! ======
//! `CookieStore` mirrors a browser cookie API: `get` returns an empty string
//! for absent or expired entries. The persistence backend is a collaborator:
//! `MemoryCookieStore` for tests and embedding, `FileCookieStore` for the CLI,
//! which keeps the jar as JSON so a session survives process restarts.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";
pub const USER_DATA_COOKIE: &str = "user_data";

/// Session cookies live for one day.
pub const SESSION_TTL: Duration = Duration::days(1);

#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("cookie file io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cookie file malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub trait CookieStore: Send + Sync {
    /// Value of a live cookie, or `""` when absent or expired.
    fn get(&self, name: &str) -> String;

    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), CookieError>;

    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn delete(&self, name: &str) -> Result<(), CookieError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct CookieEntry {
    value: String,
    /// Unix seconds.
    expires_at: i64,
}

/// Name → entry map shared by both backends.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct CookieJar {
    #[serde(default)]
    cookies: BTreeMap<String, CookieEntry>,
}

impl CookieJar {
    fn get(&self, name: &str, now: OffsetDateTime) -> String {
        self.cookies
            .get(name)
            .filter(|entry| entry.expires_at > now.unix_timestamp())
            .map(|entry| entry.value.clone())
            .unwrap_or_default()
    }

    fn set(&mut self, name: &str, value: &str, expires: OffsetDateTime) {
        self.cookies
            .insert(name.to_owned(), CookieEntry { value: value.to_owned(), expires_at: expires.unix_timestamp() });
    }

    fn delete(&mut self, name: &str) {
        self.cookies.remove(name);
    }

    fn prune(&mut self, now: OffsetDateTime) {
        let now = now.unix_timestamp();
        self.cookies.retain(|_, entry| entry.expires_at > now);
    }
}

fn lock(jar: &Mutex<CookieJar>) -> MutexGuard<'_, CookieJar> {
    jar.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-local cookie jar.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    jar: Mutex<CookieJar>,
}

impl MemoryCookieStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> String {
        lock(&self.jar).get(name, OffsetDateTime::now_utc())
    }

    fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), CookieError> {
        lock(&self.jar).set(name, value, OffsetDateTime::now_utc() + ttl);
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), CookieError> {
        lock(&self.jar).delete(name);
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Cookie jar persisted as a JSON file. Every write rewrites the whole file.
#[derive(Debug)]
pub struct FileCookieStore {
    path: PathBuf,
    jar: Mutex<CookieJar>,
}

impl FileCookieStore {
    /// Open the jar at `path`. A missing file is an empty jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CookieError> {
        let path = path.as_ref().to_path_buf();
        let jar = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => CookieJar::default(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), "cookie jar opened");
        Ok(Self { path, jar: Mutex::new(jar) })
    }

    fn persist(&self, jar: &mut CookieJar) -> Result<(), CookieError> {
        jar.prune(OffsetDateTime::now_utc());
        let bytes = serde_json::to_vec_pretty(jar)?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl CookieStore for FileCookieStore {
    fn get(&self, name: &str) -> String {
        lock(&self.jar).get(name, OffsetDateTime::now_utc())
    }

    fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), CookieError> {
        let mut jar = lock(&self.jar);
        jar.set(name, value, OffsetDateTime::now_utc() + ttl);
        self.persist(&mut jar)
    }

    fn delete(&self, name: &str) -> Result<(), CookieError> {
        let mut jar = lock(&self.jar);
        jar.delete(name);
        self.persist(&mut jar)
    }
}
