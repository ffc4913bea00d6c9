//! Dashboard page: greets the user and links to the item list.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use crate::net::types::User;
use crate::router::Route;
use crate::state::auth::AuthClient;
use crate::util::notify::Notifier;

pub const LOGGED_OUT_MESSAGE: &str = "Logged out successfully!";

/// Shared logout flow for pages that offer it.
pub fn logout_and_notify(auth: &AuthClient, notifier: &Notifier) -> Route {
    match auth.logout() {
        Ok(()) => notifier.notify(LOGGED_OUT_MESSAGE),
        Err(e) => {
            tracing::error!(error = %e, "logout could not clear session");
            notifier.notify(format!("Logout failed: {e}"));
        }
    }
    Route::Login
}

pub struct DashboardPage {
    auth: AuthClient,
    notifier: Notifier,
    user: Option<User>,
}

impl DashboardPage {
    /// Reads the user once, at construction.
    #[must_use]
    pub fn new(auth: AuthClient, notifier: Notifier) -> Self {
        let user = auth.get_user();
        Self { auth, notifier, user }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn greeting(&self) -> String {
        match &self.user {
            Some(user) => format!("Welcome, {}!", user.email),
            None => "Welcome!".to_owned(),
        }
    }

    #[must_use]
    pub fn navigate_to_list(&self) -> Route {
        Route::List
    }

    pub fn logout(&self) -> Route {
        logout_and_notify(&self.auth, &self.notifier)
    }
}
