//! In-memory fakes for the API seams.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::net::api::{ApiError, AuthApi, ItemsApi};
use crate::net::types::{Item, LoginRequest, LoginResponse, User};
use crate::state::auth::AuthClient;
use crate::state::cookies::{CookieStore, MemoryCookieStore};

pub fn item(id: u32, name: &str, description: &str) -> Item {
    Item { id, name: name.to_owned(), description: description.to_owned() }
}

/// Accepts any non-empty pair, like the real server.
#[derive(Default)]
pub struct FakeAuthApi {
    pub requests: Mutex<Vec<LoginRequest>>,
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        if request.email.is_empty() || request.password.is_empty() {
            return Err(ApiError::Status { status: 400, message: "Email and password are required".into() });
        }
        Ok(LoginResponse { token: "mock-token".into(), user: User { email: request.email.clone() } })
    }
}

/// Scripted item responses. Each call pops the next `(delay, result)`;
/// once the script is empty it answers `Ok(fallback)` immediately.
pub struct FakeItemsApi {
    script: Mutex<VecDeque<(Duration, Result<Vec<Item>, ApiError>)>>,
    fallback: Vec<Item>,
    pub calls: AtomicUsize,
}

impl FakeItemsApi {
    pub fn returning(items: Vec<Item>) -> Self {
        Self { script: Mutex::new(VecDeque::new()), fallback: items, calls: AtomicUsize::new(0) }
    }

    pub fn scripted(script: Vec<(Duration, Result<Vec<Item>, ApiError>)>) -> Self {
        Self { script: Mutex::new(script.into()), fallback: Vec::new(), calls: AtomicUsize::new(0) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemsApi for FakeItemsApi {
    async fn get_items(&self) -> Result<Vec<Item>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(self.fallback.clone()),
        }
    }
}

pub fn auth_client() -> (AuthClient, Arc<MemoryCookieStore>) {
    let cookies = Arc::new(MemoryCookieStore::new());
    let store: Arc<dyn CookieStore> = cookies.clone();
    (AuthClient::new(Arc::new(FakeAuthApi::default()), store), cookies)
}
