//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the immutable item catalog and the artificial items delay.
//! Nothing is mutated after startup, so handlers never take a lock.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{self, Item};
use crate::config::ServerConfig;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the catalog is Arc-wrapped.
#[derive(Clone, Debug)]
pub struct AppState {
    pub catalog: Arc<[Item]>,
    pub items_delay: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Vec<Item>, items_delay: Duration) -> Self {
        Self { catalog: catalog.into(), items_delay }
    }

    /// State serving the default catalog with the configured delay.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(catalog::default_catalog(), config.items_delay)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
