use super::*;
use crate::test_helpers::{FakeItemsApi, item};
use std::time::Duration;

async fn settle(store: &ListStore) -> ListState {
    let mut rx = store.subscribe();
    let state = rx.wait_for(|state| !state.loading).await.unwrap().clone();
    state
}

fn sample_items() -> Vec<Item> {
    vec![item(1, "Docker", "Containerization platform"), item(2, "Angular", "Frontend framework")]
}

// =============================================================================
// state machine
// =============================================================================

#[test]
fn new_store_is_idle() {
    let store = ListStore::new(Arc::new(FakeItemsApi::returning(Vec::new())));
    assert_eq!(store.snapshot(), ListState::default());
}

#[tokio::test]
async fn load_items_sets_loading_then_items() {
    let store = ListStore::new(Arc::new(FakeItemsApi::returning(sample_items())));
    store.load_items();
    assert!(store.snapshot().loading);
    let state = settle(&store).await;
    assert_eq!(state.items, sample_items());
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn load_items_empty_catalog_yields_empty_items() {
    let store = ListStore::new(Arc::new(FakeItemsApi::returning(Vec::new())));
    store.load_items();
    let state = settle(&store).await;
    assert!(state.items.is_empty());
    assert!(!state.loading);
}

#[tokio::test]
async fn load_failure_captures_message_and_keeps_items() {
    let api = FakeItemsApi::scripted(vec![
        (Duration::ZERO, Ok(sample_items())),
        (Duration::ZERO, Err(ApiError::Request("connection refused".into()))),
    ]);
    let store = ListStore::new(Arc::new(api));
    store.load_items();
    settle(&store).await;
    store.load_items();
    let state = settle(&store).await;
    assert_eq!(state.error.as_deref(), Some("http request failed: connection refused"));
    assert_eq!(state.items, sample_items());
}

#[tokio::test]
async fn load_failure_with_empty_message_uses_generic_text() {
    let api = FakeItemsApi::scripted(vec![(
        Duration::ZERO,
        Err(ApiError::Status { status: 500, message: String::new() }),
    )]);
    let store = ListStore::new(Arc::new(api));
    store.load_items();
    let state = settle(&store).await;
    assert_eq!(state.error.as_deref(), Some(GENERIC_LOAD_ERROR));
}

#[tokio::test]
async fn new_load_clears_previous_error() {
    let api = FakeItemsApi::scripted(vec![(Duration::ZERO, Err(ApiError::Parse("bad".into())))]);
    let store = ListStore::new(Arc::new(api));
    store.load_items();
    assert!(settle(&store).await.error.is_some());
    store.load_items();
    assert_eq!(store.snapshot().error, None);
    assert_eq!(settle(&store).await.error, None);
}

#[tokio::test]
async fn clear_error_keeps_items() {
    let api = FakeItemsApi::scripted(vec![
        (Duration::ZERO, Ok(sample_items())),
        (Duration::ZERO, Err(ApiError::Parse("bad".into()))),
    ]);
    let store = ListStore::new(Arc::new(api));
    store.load_items();
    settle(&store).await;
    store.load_items();
    settle(&store).await;
    store.clear_error();
    let state = store.snapshot();
    assert_eq!(state.error, None);
    assert!(!state.loading);
    assert_eq!(state.items, sample_items());
}

// =============================================================================
// overlapping loads
// =============================================================================

#[tokio::test(start_paused = true)]
async fn later_load_wins_over_slow_earlier_load() {
    let slow = vec![item(1, "Stale", "old")];
    let fast = vec![item(2, "Fresh", "new")];
    let api = Arc::new(FakeItemsApi::scripted(vec![
        (Duration::from_millis(500), Ok(slow)),
        (Duration::from_millis(10), Ok(fast.clone())),
    ]));
    let store = ListStore::new(api.clone());

    store.load_items();
    tokio::task::yield_now().await;
    store.load_items();

    let state = settle(&store).await;
    assert_eq!(state.items, fast);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(store.snapshot().items, fast);
    assert_eq!(api.call_count(), 2);
}

#[test]
fn stale_generation_result_is_dropped() {
    let store = ListStore::new(Arc::new(FakeItemsApi::returning(Vec::new())));
    store.inner.lock_slot().generation = 2;
    store.inner.finish(1, Ok(sample_items()));
    assert!(store.snapshot().items.is_empty());
}

// =============================================================================
// selectors
// =============================================================================

#[tokio::test]
async fn loading_selector_reports_true_then_false() {
    let store = ListStore::new(Arc::new(FakeItemsApi::returning(sample_items())));
    let mut loading = store.loading();
    assert!(!loading.get());
    store.load_items();
    assert_eq!(loading.changed().await, Some(true));
    assert_eq!(loading.changed().await, Some(false));
}

#[tokio::test]
async fn error_selector_skips_unrelated_changes() {
    let api = FakeItemsApi::scripted(vec![
        (Duration::ZERO, Ok(sample_items())),
        (Duration::ZERO, Err(ApiError::Parse("bad".into()))),
    ]);
    let store = ListStore::new(Arc::new(api));
    let mut error = store.error();
    store.load_items();
    settle(&store).await;
    store.load_items();
    assert_eq!(error.changed().await, Some(Some("response parse failed: bad".to_owned())));
}

#[tokio::test]
async fn items_selector_reports_loaded_items() {
    let store = ListStore::new(Arc::new(FakeItemsApi::returning(sample_items())));
    let mut items = store.items();
    store.load_items();
    assert_eq!(items.changed().await, Some(sample_items()));
}

#[tokio::test]
async fn selector_sync_reports_only_unseen_values() {
    let store = ListStore::new(Arc::new(FakeItemsApi::returning(sample_items())));
    let mut items = store.items();
    assert_eq!(items.sync(), None);
    store.load_items();
    settle(&store).await;
    assert_eq!(items.sync(), Some(sample_items()));
    assert_eq!(items.sync(), None);
}

#[test]
fn load_error_message_falls_back_for_blank_message() {
    let err = ApiError::Status { status: 503, message: "   ".into() };
    assert_eq!(load_error_message(&err), GENERIC_LOAD_ERROR);
}
