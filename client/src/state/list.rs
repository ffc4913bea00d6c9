//! Item-list store backing the list page.
//!
//! DESIGN
//! ======
//! `ListState` lives in a `tokio::sync::watch` channel. Only the store's
//! own actions (`load_items`, `clear_error`) write it; pages read through
//! [`Selector`] projections that wake only when their slice changes.
//!
//! Overlapping loads are latest-wins: starting a load aborts the in-flight
//! task and bumps a generation counter, and a result whose generation is no
//! longer current is dropped, so a slow superseded response can never
//! overwrite a newer one.

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::net::api::{ApiError, ItemsApi};
use crate::net::types::Item;

pub const GENERIC_LOAD_ERROR: &str = "Failed to load items";

/// Idle: `!loading && error.is_none()`; Failed: `error.is_some()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListState {
    pub items: Vec<Item>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct LoadSlot {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

struct Inner {
    api: Arc<dyn ItemsApi>,
    state: watch::Sender<ListState>,
    slot: Mutex<LoadSlot>,
}

impl Inner {
    fn lock_slot(&self) -> MutexGuard<'_, LoadSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish(&self, generation: u64, result: Result<Vec<Item>, ApiError>) {
        let mut slot = self.lock_slot();
        if slot.generation != generation {
            tracing::debug!(generation, current = slot.generation, "dropping stale item load");
            return;
        }
        slot.task = None;
        match result {
            Ok(items) => {
                tracing::debug!(generation, count = items.len(), "items loaded");
                self.state.send_modify(|state| {
                    state.items = items;
                    state.loading = false;
                });
            }
            Err(e) => {
                let message = load_error_message(&e);
                tracing::warn!(generation, error = %message, "item load failed");
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(message);
                });
            }
        }
    }
}

pub(crate) fn load_error_message(error: &ApiError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() { GENERIC_LOAD_ERROR.to_owned() } else { message }
}

/// Store handle. Clones share the same state.
#[derive(Clone)]
pub struct ListStore {
    inner: Arc<Inner>,
}

impl ListStore {
    pub fn new(api: Arc<dyn ItemsApi>) -> Self {
        let (state, _) = watch::channel(ListState::default());
        Self { inner: Arc::new(Inner { api, state, slot: Mutex::new(LoadSlot::default()) }) }
    }

    /// Start loading the catalog, replacing any load already in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn load_items(&self) {
        let mut slot = self.inner.lock_slot();
        slot.generation += 1;
        let generation = slot.generation;
        if let Some(previous) = slot.task.take() {
            previous.abort();
            tracing::debug!(generation, "superseding in-flight item load");
        }

        self.inner.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let inner = Arc::clone(&self.inner);
        slot.task = Some(tokio::spawn(async move {
            let result = inner.api.get_items().await;
            inner.finish(generation, result);
        }));
    }

    /// Failed → Idle. Items are untouched.
    pub fn clear_error(&self) {
        self.inner.state.send_if_modified(|state| state.error.take().is_some());
    }

    #[must_use]
    pub fn snapshot(&self) -> ListState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.inner.state.subscribe()
    }

    #[must_use]
    pub fn items(&self) -> Selector<Vec<Item>> {
        Selector::new(self.subscribe(), |state| state.items.clone())
    }

    #[must_use]
    pub fn loading(&self) -> Selector<bool> {
        Selector::new(self.subscribe(), |state| state.loading)
    }

    #[must_use]
    pub fn error(&self) -> Selector<Option<String>> {
        Selector::new(self.subscribe(), |state| state.error.clone())
    }
}

/// Read-only projection of [`ListState`] that only reports distinct values.
pub struct Selector<T> {
    rx: watch::Receiver<ListState>,
    select: fn(&ListState) -> T,
    last: T,
}

impl<T: Clone + PartialEq> Selector<T> {
    fn new(mut rx: watch::Receiver<ListState>, select: fn(&ListState) -> T) -> Self {
        let last = select(&rx.borrow_and_update());
        Self { rx, select, last }
    }

    /// Current projected value.
    #[must_use]
    pub fn get(&self) -> T {
        (self.select)(&self.rx.borrow())
    }

    /// Non-blocking catch-up: report the current value if it differs from
    /// the last one reported.
    pub fn sync(&mut self) -> Option<T> {
        let next = (self.select)(&self.rx.borrow_and_update());
        if next == self.last {
            return None;
        }
        self.last = next.clone();
        Some(next)
    }

    /// Wait for the projected value to differ from the last one reported.
    /// Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<T> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            let next = (self.select)(&self.rx.borrow_and_update());
            if next != self.last {
                self.last = next.clone();
                return Some(next);
            }
        }
    }
}
