//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the three mock endpoints under `/api`. CORS is wide open so a
//! browser front-end on another origin can call the API during development.

pub mod auth;
pub mod health;
pub mod items;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Endpoint listing printed at startup.
pub const ENDPOINTS: [&str; 3] = ["POST /api/login", "GET /api/items", "GET /api/health"];

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/items", get(items::list_items))
        .route("/api/health", get(health::health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
