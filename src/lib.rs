//! Mock item-catalog API.
//!
//! ARCHITECTURE
//! ============
//! A stateless axum service: `POST /api/login` accepts any non-empty
//! credential pair, `GET /api/items` serves a fixed catalog after an
//! artificial delay, and `GET /api/health` reports liveness. Nothing is
//! persisted and no endpoint checks the issued token.

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use catalog::Item;
pub use config::ServerConfig;
pub use state::AppState;

/// Serve the API on an already-bound listener until the process exits.
///
/// # Errors
///
/// Returns an error if the underlying accept loop fails.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, routes::app(state)).await
}
