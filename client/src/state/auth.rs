//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and user-aware pages. The session is nothing but
//! two cookies: `auth_token` (presence means authenticated) and `user_data`
//! (JSON-encoded [`User`]). Logout is purely local; the API has no logout
//! endpoint.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use tokio::sync::watch;

use super::cookies::{AUTH_TOKEN_COOKIE, CookieError, CookieStore, SESSION_TTL, USER_DATA_COOKIE};
use crate::net::api::{ApiError, AuthApi};
use crate::net::types::{LoginRequest, LoginResponse, User};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("session could not be stored: {0}")]
    Cookie(#[from] CookieError),
}

/// Login/logout/session-check over an [`AuthApi`] and a [`CookieStore`].
#[derive(Clone)]
pub struct AuthClient {
    api: Arc<dyn AuthApi>,
    cookies: Arc<dyn CookieStore>,
    authenticated: Arc<watch::Sender<bool>>,
}

impl AuthClient {
    /// The authenticated flag starts from whatever cookies already exist,
    /// so a restarted process resumes its session.
    pub fn new(api: Arc<dyn AuthApi>, cookies: Arc<dyn CookieStore>) -> Self {
        let initial = token_present(cookies.as_ref());
        let (authenticated, _) = watch::channel(initial);
        Self { api, cookies, authenticated: Arc::new(authenticated) }
    }

    /// Exchange credentials for a session and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Api`] if the server rejects the request or is
    /// unreachable, and [`AuthError::Cookie`] if the session cannot be stored.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let request = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let response = self.api.login(&request).await?;
        self.store_session(&response)?;
        tracing::info!(email = %response.user.email, "logged in");
        Ok(response)
    }

    /// Drop both session cookies.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie store cannot be written.
    pub fn logout(&self) -> Result<(), CookieError> {
        self.cookies.delete(AUTH_TOKEN_COOKIE)?;
        self.cookies.delete(USER_DATA_COOKIE)?;
        self.authenticated.send_replace(false);
        tracing::info!("logged out");
        Ok(())
    }

    /// True iff the token cookie is present and non-empty.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        token_present(self.cookies.as_ref())
    }

    /// Raw token, `""` when absent.
    #[must_use]
    pub fn get_token(&self) -> String {
        self.cookies.get(AUTH_TOKEN_COOKIE)
    }

    /// Parse the user cookie. Absent or malformed data yields `None`.
    #[must_use]
    pub fn get_user(&self) -> Option<User> {
        parse_user(&self.cookies.get(USER_DATA_COOKIE))
    }

    /// Observe the authenticated flag as it changes through login/logout.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    fn store_session(&self, response: &LoginResponse) -> Result<(), AuthError> {
        let user_json = serde_json::to_string(&response.user).map_err(CookieError::from)?;
        self.cookies.set(AUTH_TOKEN_COOKIE, &response.token, SESSION_TTL)?;
        if let Err(e) = self.cookies.set(USER_DATA_COOKIE, &user_json, SESSION_TTL) {
            // Token without user is a half session; roll the token back.
            if let Err(rollback) = self.cookies.delete(AUTH_TOKEN_COOKIE) {
                tracing::error!(error = %rollback, "could not roll back auth token");
            }
            return Err(e.into());
        }
        self.authenticated.send_replace(true);
        Ok(())
    }
}

fn token_present(cookies: &dyn CookieStore) -> bool {
    !cookies.get(AUTH_TOKEN_COOKIE).is_empty()
}

pub(crate) fn parse_user(raw: &str) -> Option<User> {
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str::<User>(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed user cookie");
            None
        }
    }
}
