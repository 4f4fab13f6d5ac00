//! Tests for the autosave scheduler's debounce, failure, and concurrency
//! behaviour, driven on a paused tokio clock.

use crate::board::adapters::memory::InMemoryPageStore;
use crate::board::domain::PageId;
use crate::board::ports::{
    BrowserHost, PageKind, PageRecord, PageStore, PageStoreError, PageStoreResult, SavePage,
};
use crate::board::services::{
    AutosaveConfig, AutosaveEvent, BoardSession, SaveStatus, spawn_autosave,
};
use async_trait::async_trait;
use chrono::Utc;
use mockable::DefaultClock;
use mockall::mock;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time;

/// Store wrapper that counts save attempts and tracks save concurrency.
struct CountingStore<S> {
    inner: S,
    attempts: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl<S> CountingStore<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            attempts: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: PageStore> PageStore for CountingStore<S> {
    async fn load(&self, page_id: &PageId) -> PageStoreResult<PageRecord> {
        self.inner.load(page_id).await
    }

    async fn save(&self, page_id: &PageId, update: SavePage) -> PageStoreResult<PageRecord> {
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);
        let result = self.inner.save(page_id, update).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.attempts.fetch_add(1, Ordering::SeqCst);
        result
    }

    async fn trash(&self, page_id: &PageId) -> PageStoreResult<PageRecord> {
        self.inner.trash(page_id).await
    }
}

type MemoryStore = InMemoryPageStore<DefaultClock>;

struct Harness {
    memory: MemoryStore,
    store: Arc<CountingStore<MemoryStore>>,
    page_id: PageId,
    session: BoardSession,
}

fn harness() -> Harness {
    let memory = InMemoryPageStore::new(Arc::new(DefaultClock));
    let page_id = PageId::new("page-1");
    let record = PageRecord {
        id: page_id.clone(),
        kind: PageKind::Kanban,
        title: "Sprint board".to_owned(),
        content: None,
        last_modified_at: Utc::now(),
        trashed_at: None,
    };
    memory.insert(record.clone()).expect("seed page");
    let session = BoardSession::open(&record, &BrowserHost).expect("kanban record");
    Harness {
        store: Arc::new(CountingStore::new(memory.clone())),
        memory,
        page_id,
        session,
    }
}

/// Lets the scheduler task drain its inbox without moving the clock.
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

async fn advance_ms(ms: u64) {
    time::advance(Duration::from_millis(ms)).await;
}

fn stored_column_count(record: &PageRecord) -> usize {
    record
        .content
        .as_ref()
        .and_then(|content| content.get("columns"))
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

#[tokio::test(start_paused = true)]
async fn rapid_edits_debounce_into_one_save_of_the_latest_state() {
    let mut h = harness();
    let mut handle = spawn_autosave(
        Arc::clone(&h.store),
        h.page_id.clone(),
        None,
        AutosaveConfig::default(),
    );

    // edits at t=0, t=500, t=1000; each restarts the 2000ms quiet period
    h.session.add_column("One");
    handle.observe(h.session.snapshot());
    settle().await;
    advance_ms(500).await;
    h.session.add_column("Two");
    handle.observe(h.session.snapshot());
    settle().await;
    advance_ms(500).await;
    h.session.add_column("Three");
    handle.observe(h.session.snapshot());
    settle().await;
    assert_eq!(handle.status(), SaveStatus::Unsaved);

    advance_ms(1999).await;
    settle().await;
    assert_eq!(h.store.attempts(), 0, "quiet period still open at t=2999");

    advance_ms(1).await;
    let event = handle.next_event().await.expect("scheduler alive");
    assert!(matches!(event, AutosaveEvent::Saved(_)));
    assert_eq!(h.store.attempts(), 1, "one flush for three edits");
    settle().await;
    assert_eq!(handle.status(), SaveStatus::Idle);

    let stored = h.memory.load(&h.page_id).await.expect("page exists");
    assert_eq!(
        stored_column_count(&stored),
        7,
        "flushed state is the one from the last edit"
    );
}

#[tokio::test(start_paused = true)]
async fn observation_matching_the_persisted_snapshot_stays_idle() {
    let mut h = harness();
    let baseline = h.session.snapshot();
    let handle = spawn_autosave(
        Arc::clone(&h.store),
        h.page_id.clone(),
        Some(baseline.clone()),
        AutosaveConfig::default(),
    );

    handle.observe(baseline.clone());
    settle().await;
    assert_eq!(handle.status(), SaveStatus::Idle);

    advance_ms(5000).await;
    settle().await;
    assert_eq!(h.store.attempts(), 0);

    // a real change still schedules normally afterwards
    h.session.add_column("Blocked");
    handle.observe(h.session.snapshot());
    settle().await;
    assert_eq!(handle.status(), SaveStatus::Unsaved);
}

#[tokio::test(start_paused = true)]
async fn editing_back_to_the_persisted_state_cancels_the_pending_flush() {
    let mut h = harness();
    let baseline = h.session.snapshot();
    let handle = spawn_autosave(
        Arc::clone(&h.store),
        h.page_id.clone(),
        Some(baseline.clone()),
        AutosaveConfig::default(),
    );

    let column = h.session.add_column("Temporary");
    handle.observe(h.session.snapshot());
    settle().await;
    assert_eq!(handle.status(), SaveStatus::Unsaved);

    h.session.delete_column(&column);
    handle.observe(h.session.snapshot());
    settle().await;
    assert_eq!(handle.status(), SaveStatus::Idle);

    advance_ms(5000).await;
    settle().await;
    assert_eq!(h.store.attempts(), 0, "no flush for a net no-op");
}

#[tokio::test(start_paused = true)]
async fn failed_save_keeps_changes_pending_until_the_next_edit() {
    let mut h = harness();
    let mut handle = spawn_autosave(
        Arc::clone(&h.store),
        h.page_id.clone(),
        None,
        AutosaveConfig::default(),
    );

    h.memory.fail_next_save();
    h.session.add_column("Doomed first flush");
    handle.observe(h.session.snapshot());
    advance_ms(2000).await;
    let event = handle.next_event().await.expect("scheduler alive");
    assert!(matches!(event, AutosaveEvent::Failed { .. }));
    settle().await;
    assert_eq!(handle.status(), SaveStatus::Unsaved, "never back to idle");
    assert_eq!(h.store.attempts(), 1);

    // no timed retry
    advance_ms(60_000).await;
    settle().await;
    assert_eq!(h.store.attempts(), 1);

    // the next edit restarts the debounce and flushes the newest state
    h.session.add_column("Recovery");
    handle.observe(h.session.snapshot());
    advance_ms(2000).await;
    let recovered = handle.next_event().await.expect("scheduler alive");
    assert!(matches!(recovered, AutosaveEvent::Saved(_)));
    assert_eq!(h.store.attempts(), 2);

    let stored = h.memory.load(&h.page_id).await.expect("page exists");
    assert_eq!(stored_column_count(&stored), 6, "both columns persisted");
}

#[tokio::test(start_paused = true)]
async fn retry_flushes_pending_changes_without_an_edit() {
    let mut h = harness();
    let mut handle = spawn_autosave(
        Arc::clone(&h.store),
        h.page_id.clone(),
        None,
        AutosaveConfig::default(),
    );

    h.memory.fail_next_save();
    h.session.add_column("Stuck");
    handle.observe(h.session.snapshot());
    advance_ms(2000).await;
    let event = handle.next_event().await.expect("scheduler alive");
    assert!(matches!(event, AutosaveEvent::Failed { .. }));

    handle.retry();
    let retried = handle.next_event().await.expect("scheduler alive");
    assert!(matches!(retried, AutosaveEvent::Saved(_)));
    assert_eq!(h.store.attempts(), 2);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_cancels_a_pending_flush() {
    let mut h = harness();
    let handle = spawn_autosave(
        Arc::clone(&h.store),
        h.page_id.clone(),
        None,
        AutosaveConfig::default(),
    );

    h.session.add_column("Never persisted");
    handle.observe(h.session.snapshot());
    settle().await;
    drop(handle);

    advance_ms(10_000).await;
    settle().await;
    assert_eq!(h.store.attempts(), 0, "unmount must not write");
}

#[tokio::test(start_paused = true)]
async fn edits_during_an_in_flight_save_defer_to_the_next_cycle() {
    let mut h = harness();
    h.memory.set_save_delay(Duration::from_millis(400));
    let mut handle = spawn_autosave(
        Arc::clone(&h.store),
        h.page_id.clone(),
        None,
        AutosaveConfig::default(),
    );

    h.session.add_column("First");
    handle.observe(h.session.snapshot());
    settle().await;
    advance_ms(2000).await;
    settle().await;
    assert_eq!(handle.status(), SaveStatus::Saving);

    // the user keeps editing while the write is in flight
    h.session.add_column("Second");
    handle.observe(h.session.snapshot());
    settle().await;

    advance_ms(400).await;
    let first = handle.next_event().await.expect("scheduler alive");
    assert!(matches!(first, AutosaveEvent::Saved(_)));
    settle().await;
    assert_eq!(
        handle.status(),
        SaveStatus::Unsaved,
        "the mid-flight edit is pending, not lost"
    );

    advance_ms(2000).await;
    let second = handle.next_event().await.expect("scheduler alive");
    assert!(matches!(second, AutosaveEvent::Saved(_)));
    assert_eq!(h.store.attempts(), 2);
    assert_eq!(h.store.max_in_flight(), 1, "flushes never overlap");

    let stored = h.memory.load(&h.page_id).await.expect("page exists");
    assert_eq!(stored_column_count(&stored), 6, "newest state persisted");
}

mock! {
    Store {}

    #[async_trait]
    impl PageStore for Store {
        async fn load(&self, page_id: &PageId) -> PageStoreResult<PageRecord>;
        async fn save(&self, page_id: &PageId, update: SavePage) -> PageStoreResult<PageRecord>;
        async fn trash(&self, page_id: &PageId) -> PageStoreResult<PageRecord>;
        async fn subscribe(
            &self,
            page_id: &PageId,
        ) -> PageStoreResult<Option<broadcast::Receiver<PageRecord>>>;
    }
}

#[tokio::test(start_paused = true)]
async fn store_rejection_surfaces_as_a_failed_event() {
    let mut store = MockStore::new();
    store
        .expect_save()
        .times(1)
        .returning(|page_id, _| Err(PageStoreError::NotFound(page_id.clone())));

    let mut h = harness();
    let mut handle = spawn_autosave(
        Arc::new(store),
        h.page_id.clone(),
        None,
        AutosaveConfig::default(),
    );

    h.session.add_column("Unwanted");
    handle.observe(h.session.snapshot());
    advance_ms(2000).await;

    let event = handle.next_event().await.expect("scheduler alive");
    let AutosaveEvent::Failed { message } = event else {
        panic!("expected a failure event");
    };
    assert!(message.contains("not found"));
}
