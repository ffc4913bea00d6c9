//! Client against the real mock API on an ephemeral port.

use std::sync::Arc;
use std::time::Duration;

use client::app::App;
use client::net::api::{ApiClient, ApiError, ItemsApi};
use client::router::{Page, Route};
use client::state::cookies::{FileCookieStore, MemoryCookieStore};
use mock_api::{AppState, catalog};

async fn spawn_server(items_delay: Duration) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_api::serve(listener, AppState::new(catalog::default_catalog(), items_delay)));
    format!("http://{addr}/api")
}

fn app_for(base: &str) -> App {
    let api = Arc::new(ApiClient::new(base).unwrap());
    App::with_parts(api.clone(), api, Arc::new(MemoryCookieStore::new()))
}

#[tokio::test]
async fn get_items_returns_catalog_in_order() {
    let base = spawn_server(Duration::ZERO).await;
    let api = ApiClient::new(&base).unwrap();
    let items = api.get_items().await.unwrap();
    let expected: Vec<(u32, String)> = catalog::default_catalog().into_iter().map(|item| (item.id, item.name)).collect();
    let actual: Vec<(u32, String)> = items.into_iter().map(|item| (item.id, item.name)).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn empty_catalog_yields_empty_sequence() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_api::serve(listener, AppState::new(Vec::new(), Duration::ZERO)));
    let api = ApiClient::new(&format!("http://{addr}/api")).unwrap();
    assert!(api.get_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn login_persists_session_and_logout_clears_it() {
    let base = spawn_server(Duration::ZERO).await;
    let app = app_for(&base);

    let response = app.auth().login("test@example.com", "password123").await.unwrap();
    assert!(response.token.starts_with("mock-jwt-token-"));
    assert!(app.auth().is_authenticated());
    assert_eq!(app.auth().get_token(), response.token);
    assert_eq!(app.auth().get_user().map(|u| u.email), Some("test@example.com".into()));

    app.auth().logout().unwrap();
    assert!(!app.auth().is_authenticated());
    assert_eq!(app.auth().get_user(), None);
}

#[tokio::test]
async fn login_with_empty_password_surfaces_server_message() {
    let base = spawn_server(Duration::ZERO).await;
    let app = app_for(&base);
    let err = app.auth().login("test@example.com", "").await.unwrap_err();
    assert_eq!(err.to_string(), "Email and password are required");
    assert!(!app.auth().is_authenticated());
}

#[tokio::test]
async fn guarded_list_loads_after_login() {
    let base = spawn_server(Duration::from_millis(50)).await;
    let app = app_for(&base);
    assert_eq!(app.navigate("/list").route, Route::Login);

    app.auth().login("test@example.com", "pw").await.unwrap();
    let nav = app.navigate("/list");
    assert_eq!(nav.route, Route::List);
    let Page::List(mut page) = nav.page else { panic!("expected list page") };
    assert!(page.loading());

    let settled = page.wait_until_loaded().await;
    assert_eq!(settled.items.len(), catalog::default_catalog().len());
    assert_eq!(settled.error, None);
    assert_eq!(page.filtered_items().len(), settled.items.len());
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api = ApiClient::new(&format!("http://{addr}/api")).unwrap();
    assert!(matches!(api.get_items().await, Err(ApiError::Request(_))));
}

#[tokio::test]
async fn file_session_survives_restart() {
    let base = spawn_server(Duration::ZERO).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let api = Arc::new(ApiClient::new(&base).unwrap());
        let app = App::with_parts(api.clone(), api, Arc::new(FileCookieStore::open(&path).unwrap()));
        app.auth().login("persist@example.com", "pw").await.unwrap();
    }

    let api = Arc::new(ApiClient::new(&base).unwrap());
    let app = App::with_parts(api.clone(), api, Arc::new(FileCookieStore::open(&path).unwrap()));
    assert!(app.auth().is_authenticated());
    assert_eq!(app.auth().get_user().map(|u| u.email), Some("persist@example.com".into()));
}
