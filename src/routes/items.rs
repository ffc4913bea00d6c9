//! Item catalog route.

use axum::extract::State;
use axum::response::Json;

use crate::catalog::Item;
use crate::state::AppState;

/// `GET /api/items`: full catalog after the configured artificial delay.
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    if !state.items_delay.is_zero() {
        tokio::time::sleep(state.items_delay).await;
    }
    tracing::debug!(count = state.catalog.len(), "serving items");
    Json(state.catalog.to_vec())
}

#[cfg(test)]
#[path = "items_test.rs"]
mod tests;
