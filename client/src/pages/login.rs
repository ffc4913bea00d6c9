//! Login page: email + password form.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::router::Route;
use crate::state::auth::AuthClient;
use crate::util::notify::Notifier;

pub const MISSING_INPUT_MESSAGE: &str = "Enter both email and password.";

/// Trim the email and require both fields. The password is sent verbatim.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_INPUT_MESSAGE);
    }
    Ok((email.to_owned(), password.to_owned()))
}

pub struct LoginPage {
    auth: AuthClient,
    notifier: Notifier,
    pub email: String,
    pub password: String,
    busy: bool,
}

impl LoginPage {
    #[must_use]
    pub fn new(auth: AuthClient, notifier: Notifier) -> Self {
        Self { auth, notifier, email: String::new(), password: String::new(), busy: false }
    }

    #[must_use]
    pub fn busy(&self) -> bool {
        self.busy
    }

    /// Submit the form. Returns the route to navigate to on success; on
    /// failure the error is shown as a notification and the page stays put.
    pub async fn submit(&mut self) -> Option<Route> {
        if self.busy {
            return None;
        }
        let (email, password) = match validate_login_input(&self.email, &self.password) {
            Ok(input) => input,
            Err(message) => {
                self.notifier.notify(message);
                return None;
            }
        };

        self.busy = true;
        let result = self.auth.login(&email, &password).await;
        self.busy = false;

        match result {
            Ok(_) => {
                self.password.clear();
                self.notifier.notify("Login successful!");
                Some(Route::Dashboard)
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                self.notifier.notify(format!("Login failed: {e}"));
                None
            }
        }
    }
}
