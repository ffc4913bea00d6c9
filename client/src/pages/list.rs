//! Item list page: search, category filter, view mode.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the list store through selectors and keeps a locally filtered copy
//! of the items. Search input is debounced; category and clear-filter
//! changes re-filter immediately.
//!
//! The page is driven by [`ListPage::next_update`]: each call waits for the
//! next debounced search term or store change, applies it, and reports what
//! happened.

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tokio::sync::mpsc;

use super::dashboard::logout_and_notify;
use crate::net::types::Item;
use crate::router::Route;
use crate::state::auth::AuthClient;
use crate::state::list::{ListState, ListStore, Selector};
use crate::util::debounce::debounce;
use crate::util::item_meta::{Category, item_category};
use crate::util::notify::Notifier;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view mode `{0}` (expected grid or list)")]
pub struct UnknownViewMode(pub String);

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            _ => Err(UnknownViewMode(s.to_owned())),
        }
    }
}

/// `(search empty OR name/description contains it) AND (no category OR
/// category matches)`. Search is a case-insensitive substring match taken
/// as typed; whitespace is significant.
#[must_use]
pub fn filter_items(items: &[Item], search: &str, category: Option<Category>) -> Vec<Item> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item.name.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .filter(|item| category.is_none_or(|category| item_category(&item.name) == category))
        .cloned()
        .collect()
}

/// What a call to [`ListPage::next_update`] applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListUpdate {
    /// A debounced search term arrived and the list was re-filtered.
    Searched(String),
    /// The store's items changed and the list was re-filtered.
    ItemsChanged(usize),
    LoadingChanged(bool),
    /// The store entered the failed state; the message was also notified.
    Failed(String),
    ErrorCleared,
}

enum Event {
    Search(String),
    Items,
    Loading(bool),
    Error(Option<String>),
}

pub struct ListPage {
    store: ListStore,
    auth: AuthClient,
    notifier: Notifier,
    search_term: String,
    selected_category: Option<Category>,
    view_mode: ViewMode,
    filtered: Vec<Item>,
    filter_runs: usize,
    search_tx: mpsc::UnboundedSender<String>,
    search_rx: mpsc::UnboundedReceiver<String>,
    items: Selector<Vec<Item>>,
    loading: Selector<bool>,
    error: Selector<Option<String>>,
}

impl ListPage {
    /// Must be called from within a tokio runtime (spawns the debouncer).
    #[must_use]
    pub fn new(store: ListStore, auth: AuthClient, notifier: Notifier) -> Self {
        let (search_tx, search_rx) = debounce(SEARCH_DEBOUNCE);
        let items = store.items();
        let loading = store.loading();
        let error = store.error();
        let filtered = filter_items(&items.get(), "", None);
        Self {
            store,
            auth,
            notifier,
            search_term: String::new(),
            selected_category: None,
            view_mode: ViewMode::default(),
            filtered,
            filter_runs: 0,
            search_tx,
            search_rx,
            items,
            loading,
            error,
        }
    }

    #[must_use]
    pub fn filtered_items(&self) -> &[Item] {
        &self.filtered
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<Category> {
        self.selected_category
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Number of times the filter has been evaluated since construction.
    #[must_use]
    pub fn filter_runs(&self) -> usize {
        self.filter_runs
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    /// Initial load and the retry action.
    pub fn load_items(&self) {
        self.store.load_items();
    }

    pub fn clear_error(&self) {
        self.store.clear_error();
    }

    /// Record the new term; the re-filter happens once the debounce window
    /// passes without further input.
    pub fn on_search_change(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.push_search();
    }

    /// Selecting the already-selected category clears the filter.
    pub fn filter_by_category(&mut self, category: Category) {
        self.selected_category = if self.selected_category == Some(category) { None } else { Some(category) };
        self.apply_filter();
    }

    /// Reset search and category. The debouncer is replaced so a pending
    /// term is dropped and the next term typed is never deduplicated against
    /// one emitted before the clear. Must be called from within a tokio
    /// runtime.
    pub fn clear_filters(&mut self) {
        self.search_term.clear();
        self.selected_category = None;
        (self.search_tx, self.search_rx) = debounce(SEARCH_DEBOUNCE);
        self.apply_filter();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    #[must_use]
    pub fn go_to_dashboard(&self) -> Route {
        Route::Dashboard
    }

    pub fn logout(&self) -> Route {
        logout_and_notify(&self.auth, &self.notifier)
    }

    /// Wait for the next search or store change and apply it. Returns `None`
    /// once every source is closed.
    pub async fn next_update(&mut self) -> Option<ListUpdate> {
        let event = tokio::select! {
            Some(term) = self.search_rx.recv() => Event::Search(term),
            Some(_) = self.items.changed() => Event::Items,
            Some(loading) = self.loading.changed() => Event::Loading(loading),
            Some(error) = self.error.changed() => Event::Error(error),
            else => return None,
        };
        Some(self.handle(event))
    }

    /// Wait until the store is no longer loading, then apply whatever changed
    /// in the meantime. Returns the settled store state.
    pub async fn wait_until_loaded(&mut self) -> ListState {
        let mut rx = self.store.subscribe();
        let settled = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.store.snapshot(),
        };
        self.catch_up();
        settled
    }

    /// Apply pending store changes without waiting.
    pub fn catch_up(&mut self) -> Vec<ListUpdate> {
        let mut updates = Vec::new();
        if let Some(loading) = self.loading.sync() {
            updates.push(self.handle(Event::Loading(loading)));
        }
        if self.items.sync().is_some() {
            updates.push(self.handle(Event::Items));
        }
        if let Some(error) = self.error.sync() {
            updates.push(self.handle(Event::Error(error)));
        }
        updates
    }

    fn handle(&mut self, event: Event) -> ListUpdate {
        match event {
            Event::Search(term) => {
                tracing::debug!(term = %term, "debounced search");
                self.apply_filter();
                ListUpdate::Searched(term)
            }
            Event::Items => {
                self.apply_filter();
                ListUpdate::ItemsChanged(self.filtered.len())
            }
            Event::Loading(loading) => ListUpdate::LoadingChanged(loading),
            Event::Error(Some(message)) => {
                self.notifier.notify(message.clone());
                ListUpdate::Failed(message)
            }
            Event::Error(None) => ListUpdate::ErrorCleared,
        }
    }

    fn push_search(&self) {
        if self.search_tx.send(self.search_term.clone()).is_err() {
            tracing::warn!("search debouncer stopped; term not scheduled");
        }
    }

    fn apply_filter(&mut self) {
        self.filtered = filter_items(&self.items.get(), &self.search_term, self.selected_category);
        self.filter_runs += 1;
    }
}
