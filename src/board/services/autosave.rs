//! Autosave scheduler: debounced full-snapshot persistence with status
//! reporting.
//!
//! The scheduler runs as a single spawned actor task. Observed snapshots
//! arrive on a channel, the debounce timer is a `select!` branch, and the
//! store write is awaited inline, which makes the "never two overlapping
//! flushes for the same board" invariant hold by construction rather than
//! by flag discipline. Edits made while a write is in flight queue up on
//! the channel and start a fresh debounce cycle once the write settles.

use super::session::BoardSnapshot;
use crate::board::domain::PageId;
use crate::board::ports::{PageRecord, PageStore, PageStoreError, PageStoreResult, SavePage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant};
use tracing::{debug, warn};

/// How long an idle scheduler parks between wake-ups when no flush is due.
const IDLE_PARK: Duration = Duration::from_secs(3600);

/// Persistence state of the open page, for UI feedback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveStatus {
    /// Local state matches the last persisted snapshot.
    #[default]
    Idle,
    /// Local state differs; a flush is scheduled or awaiting an edit.
    Unsaved,
    /// A flush is in flight.
    Saving,
}

impl SaveStatus {
    /// Returns a short tag for display and logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Unsaved => "unsaved",
            Self::Saving => "saving",
        }
    }
}

/// Autosave tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveConfig {
    /// Quiet period after the last differing edit before a flush is issued.
    pub quiet_period: Duration,
}

impl AutosaveConfig {
    /// Creates a config with the given quiet period.
    #[must_use]
    pub const fn new(quiet_period: Duration) -> Self {
        Self { quiet_period }
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

/// Outcome notifications surfaced to the UI layer.
#[derive(Debug, Clone)]
pub enum AutosaveEvent {
    /// A flush succeeded; the record is the store's canonical state and
    /// carries the authoritative `last_modified_at`.
    Saved(PageRecord),
    /// A flush failed; local changes are retained and will be retried on
    /// the next edit (or an explicit [`AutosaveHandle::retry`]).
    Failed {
        /// Human-readable failure description for a transient notification.
        message: String,
    },
}

enum SchedulerMessage {
    Change(BoardSnapshot),
    Retry,
}

/// Handle owned by the editing session's UI layer.
///
/// Dropping the handle shuts the scheduler down: a pending debounce is
/// cancelled without flushing (nothing must write to a closed page context),
/// while a write already in flight completes against the store.
pub struct AutosaveHandle {
    messages: mpsc::UnboundedSender<SchedulerMessage>,
    status: watch::Receiver<SaveStatus>,
    events: mpsc::UnboundedReceiver<AutosaveEvent>,
}

impl AutosaveHandle {
    /// Reports a new value of the page's persistable state.
    ///
    /// Cheap to call on every mutation: the scheduler deep-compares against
    /// the last persisted snapshot and ignores observations that match it.
    pub fn observe(&self, snapshot: BoardSnapshot) {
        self.messages.send(SchedulerMessage::Change(snapshot)).ok();
    }

    /// Requests an immediate flush of changes left pending by a failed
    /// save, without waiting for another edit.
    pub fn retry(&self) {
        self.messages.send(SchedulerMessage::Retry).ok();
    }

    /// Returns the current save status.
    #[must_use]
    pub fn status(&self) -> SaveStatus {
        *self.status.borrow()
    }

    /// Returns a watch stream of save status changes.
    #[must_use]
    pub fn status_stream(&self) -> watch::Receiver<SaveStatus> {
        self.status.clone()
    }

    /// Receives the next save outcome, or `None` once the scheduler has
    /// stopped.
    pub async fn next_event(&mut self) -> Option<AutosaveEvent> {
        self.events.recv().await
    }
}

/// Spawns the autosave scheduler for one open page.
///
/// `last_persisted` is the snapshot decoded from the record the page was
/// opened with; `None` (no stored content yet, or a legacy/unreadable
/// payload) makes the first observed snapshot count as a difference, so
/// freshly migrated boards get persisted in the current shape.
pub fn spawn_autosave<S>(
    store: Arc<S>,
    page_id: PageId,
    last_persisted: Option<BoardSnapshot>,
    config: AutosaveConfig,
) -> AutosaveHandle
where
    S: PageStore + 'static,
{
    let (message_tx, message_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (status_tx, status_rx) = watch::channel(SaveStatus::Idle);
    tokio::spawn(run(
        store,
        page_id,
        last_persisted,
        config,
        message_rx,
        event_tx,
        status_tx,
    ));
    AutosaveHandle {
        messages: message_tx,
        status: status_rx,
        events: event_rx,
    }
}

/// Scheduler actor loop.
async fn run<S>(
    store: Arc<S>,
    page_id: PageId,
    mut last_persisted: Option<BoardSnapshot>,
    config: AutosaveConfig,
    mut inbox: mpsc::UnboundedReceiver<SchedulerMessage>,
    events: mpsc::UnboundedSender<AutosaveEvent>,
    status: watch::Sender<SaveStatus>,
) where
    S: PageStore,
{
    let mut pending: Option<BoardSnapshot> = None;
    let mut deadline: Option<Instant> = None;

    loop {
        let wake = deadline.unwrap_or_else(|| Instant::now() + IDLE_PARK);
        tokio::select! {
            // Inbox first: a newer observation supersedes an armed flush,
            // and a dropped handle must cancel it rather than race it.
            biased;
            message = inbox.recv() => match message {
                Some(SchedulerMessage::Change(snapshot)) => {
                    if last_persisted.as_ref() == Some(&snapshot) {
                        // Edited back to the persisted value: nothing to
                        // flush any more.
                        pending = None;
                        deadline = None;
                        status.send_replace(SaveStatus::Idle);
                    } else {
                        // Debounce: every differing edit restarts the timer.
                        pending = Some(snapshot);
                        deadline = Some(Instant::now() + config.quiet_period);
                        status.send_replace(SaveStatus::Unsaved);
                    }
                }
                Some(SchedulerMessage::Retry) => {
                    if pending.is_some() && deadline.is_none() {
                        deadline = Some(Instant::now());
                    }
                }
                // Handle dropped: cancel any pending debounce, stop.
                None => break,
            },
            () = time::sleep_until(wake), if deadline.is_some() => {
                deadline = None;
                let Some(snapshot) = pending.take() else {
                    continue;
                };
                status.send_replace(SaveStatus::Saving);
                match write_snapshot(store.as_ref(), &page_id, &snapshot).await {
                    Ok(record) => {
                        debug!(page = %page_id, "board snapshot flushed");
                        last_persisted =
                            BoardSnapshot::from_record(&record).or(Some(snapshot));
                        events.send(AutosaveEvent::Saved(record)).ok();
                        status.send_replace(SaveStatus::Idle);
                    }
                    Err(err) => {
                        warn!(page = %page_id, error = %err, "board autosave failed");
                        events
                            .send(AutosaveEvent::Failed {
                                message: err.to_string(),
                            })
                            .ok();
                        // Keep the changes; the next edit (or an explicit
                        // retry) restarts the debounce. No timed retry.
                        pending = Some(snapshot);
                        status.send_replace(SaveStatus::Unsaved);
                    }
                }
            }
        }
    }
}

/// Serialises and writes one snapshot as a full-replace save.
async fn write_snapshot<S>(
    store: &S,
    page_id: &PageId,
    snapshot: &BoardSnapshot,
) -> PageStoreResult<PageRecord>
where
    S: PageStore + ?Sized,
{
    let content = snapshot.to_content().map_err(PageStoreError::backend)?;
    store
        .save(
            page_id,
            SavePage {
                title: snapshot.title.clone(),
                content,
            },
        )
        .await
}
