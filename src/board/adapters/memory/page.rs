//! In-memory page store for tests and self-contained embedding hosts.

use crate::board::domain::PageId;
use crate::board::ports::{PageRecord, PageStore, PageStoreError, PageStoreResult, SavePage};
use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;

/// Broadcast buffer per page; slow subscribers lag rather than block saves.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

struct PageEntry {
    record: PageRecord,
    changes: broadcast::Sender<PageRecord>,
}

/// Thread-safe in-memory page store.
///
/// Stamps `last_modified_at` from an injected clock and fans saved records
/// out to `subscribe` listeners. Test hooks can inject one save failure and
/// an artificial save latency to exercise the autosave scheduler's error
/// and in-flight paths.
pub struct InMemoryPageStore<C> {
    state: Arc<RwLock<HashMap<PageId, PageEntry>>>,
    clock: Arc<C>,
    fail_next_save: Arc<AtomicBool>,
    save_delay_ms: Arc<AtomicU64>,
}

impl<C> Clone for InMemoryPageStore<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
            fail_next_save: Arc::clone(&self.fail_next_save),
            save_delay_ms: Arc::clone(&self.save_delay_ms),
        }
    }
}

impl<C> InMemoryPageStore<C> {
    /// Creates an empty store using the given clock.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            clock,
            fail_next_save: Arc::new(AtomicBool::new(false)),
            save_delay_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Seeds a page record, replacing any existing record with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`PageStoreError::Backend`] when the state lock is poisoned.
    pub fn insert(&self, record: PageRecord) -> PageStoreResult<()> {
        let mut state = lock_write(&self.state)?;
        let id = record.id.clone();
        match state.entry(id) {
            Entry::Occupied(mut occupied) => occupied.get_mut().record = record,
            Entry::Vacant(vacant) => {
                let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
                vacant.insert(PageEntry { record, changes });
            }
        }
        Ok(())
    }

    /// Arms a single injected failure for the next `save` call.
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    /// Adds artificial latency to every `save` call.
    pub fn set_save_delay(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.save_delay_ms.store(millis, Ordering::SeqCst);
    }
}

fn lock_write<T>(
    lock: &Arc<RwLock<T>>,
) -> Result<std::sync::RwLockWriteGuard<'_, T>, PageStoreError> {
    lock.write()
        .map_err(|err| PageStoreError::backend(std::io::Error::other(err.to_string())))
}

fn lock_read<T>(
    lock: &Arc<RwLock<T>>,
) -> Result<std::sync::RwLockReadGuard<'_, T>, PageStoreError> {
    lock.read()
        .map_err(|err| PageStoreError::backend(std::io::Error::other(err.to_string())))
}

#[async_trait]
impl<C> PageStore for InMemoryPageStore<C>
where
    C: Clock + Send + Sync,
{
    async fn load(&self, page_id: &PageId) -> PageStoreResult<PageRecord> {
        let state = lock_read(&self.state)?;
        state
            .get(page_id)
            .map(|entry| entry.record.clone())
            .ok_or_else(|| PageStoreError::NotFound(page_id.clone()))
    }

    async fn save(&self, page_id: &PageId, update: SavePage) -> PageStoreResult<PageRecord> {
        let delay_ms = self.save_delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(PageStoreError::backend(std::io::Error::other(
                "injected save failure",
            )));
        }

        let mut state = lock_write(&self.state)?;
        let entry = state
            .get_mut(page_id)
            .ok_or_else(|| PageStoreError::NotFound(page_id.clone()))?;
        entry.record.title = update.title;
        entry.record.content = Some(update.content);
        entry.record.last_modified_at = self.clock.utc();
        let record = entry.record.clone();
        entry.changes.send(record.clone()).ok();
        Ok(record)
    }

    async fn trash(&self, page_id: &PageId) -> PageStoreResult<PageRecord> {
        let mut state = lock_write(&self.state)?;
        let entry = state
            .get_mut(page_id)
            .ok_or_else(|| PageStoreError::NotFound(page_id.clone()))?;
        entry.record.trashed_at = Some(self.clock.utc());
        let record = entry.record.clone();
        entry.changes.send(record.clone()).ok();
        Ok(record)
    }

    async fn subscribe(
        &self,
        page_id: &PageId,
    ) -> PageStoreResult<Option<broadcast::Receiver<PageRecord>>> {
        let state = lock_read(&self.state)?;
        state
            .get(page_id)
            .map(|entry| Some(entry.changes.subscribe()))
            .ok_or_else(|| PageStoreError::NotFound(page_id.clone()))
    }
}
