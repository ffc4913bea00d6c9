//! Application root: wires the HTTP client, session, notifier, and router.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::ClientConfig;
use crate::net::api::{ApiClient, ApiError, AuthApi, ItemsApi};
use crate::net::types::HealthResponse;
use crate::router::{AppContext, Navigation, Route, Router};
use crate::state::auth::AuthClient;
use crate::state::cookies::{CookieError, CookieStore, FileCookieStore};
use crate::util::notify::{Notification, Notifier};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("session file could not be opened: {0}")]
    Cookie(#[from] CookieError),
}

pub struct App {
    api: Option<ApiClient>,
    router: Router,
    notifications: mpsc::UnboundedReceiver<Notification>,
}

impl App {
    /// Real HTTP client plus the file-backed session from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the session
    /// file exists but cannot be read.
    pub fn from_config(config: &ClientConfig) -> Result<Self, StartupError> {
        let api = ApiClient::new(&config.base_url)?;
        let cookies: Arc<dyn CookieStore> = Arc::new(FileCookieStore::open(&config.session_file)?);
        let shared = Arc::new(api.clone());
        let mut app = Self::with_parts(shared.clone(), shared, cookies);
        app.api = Some(api);
        Ok(app)
    }

    /// Assemble from explicit collaborators.
    #[must_use]
    pub fn with_parts(auth_api: Arc<dyn AuthApi>, items_api: Arc<dyn ItemsApi>, cookies: Arc<dyn CookieStore>) -> Self {
        let (notifier, notifications) = Notifier::channel();
        let auth = AuthClient::new(auth_api, cookies);
        let router = Router::new(AppContext { auth, items: items_api, notifier });
        Self { api: None, router, notifications }
    }

    #[must_use]
    pub fn auth(&self) -> &AuthClient {
        &self.router.context().auth
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.router.context().notifier
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Must be called from within a tokio runtime.
    pub fn navigate(&self, path: &str) -> Navigation {
        self.router.navigate(path)
    }

    pub fn navigate_to(&self, route: Route) -> Navigation {
        self.router.navigate_to(route)
    }

    /// Notifications queued since the last call, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let mut drained = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            drained.push(notification);
        }
        drained
    }

    /// `GET /health` through the real HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the server is unreachable, or
    /// [`ApiError::Request`] when the app was assembled without one.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        match &self.api {
            Some(api) => api.health().await,
            None => Err(ApiError::Request("no HTTP client configured".into())),
        }
    }
}
