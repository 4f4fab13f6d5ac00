//! Page store port: the contract this crate holds against the hosted data
//! store platform.
//!
//! Persistence, auth, and realtime push all live behind this boundary. The
//! board core only needs full-record load, full-replace save, trashing, and
//! an optional change feed.

use crate::board::domain::PageId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Result type for page store operations.
pub type PageStoreResult<T> = Result<T, PageStoreError>;

/// Kind of content a workspace page holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PageKind {
    /// Rich-text document.
    Document,
    /// Kanban board, the kind this crate owns.
    Kanban,
    /// Checklist.
    List,
    /// Calendar of events.
    Calendar,
    /// Chart over tabular data.
    Chart,
}

impl PageKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "DOCUMENT",
            Self::Kanban => "KANBAN",
            Self::List => "LIST",
            Self::Calendar => "CALENDAR",
            Self::Chart => "CHART",
        }
    }
}

/// Error returned while parsing a page kind from the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown page kind: {0}")]
pub struct ParsePageKindError(pub String);

impl TryFrom<&str> for PageKind {
    type Error = ParsePageKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "DOCUMENT" => Ok(Self::Document),
            "KANBAN" => Ok(Self::Kanban),
            "LIST" => Ok(Self::List),
            "CALENDAR" => Ok(Self::Calendar),
            "CHART" => Ok(Self::Chart),
            _ => Err(ParsePageKindError(value.to_owned())),
        }
    }
}

/// Canonical persisted record for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page identifier.
    pub id: PageId,
    /// Content kind.
    pub kind: PageKind,
    /// Display title.
    pub title: String,
    /// Raw content payload; `None` before the first save. The board core
    /// never interprets this outside [`crate::board::migrate`].
    pub content: Option<Value>,
    /// Timestamp of the last accepted write.
    pub last_modified_at: DateTime<Utc>,
    /// When the page was moved to trash, if it has been.
    pub trashed_at: Option<DateTime<Utc>>,
}

/// Full-replace write payload for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePage {
    /// New title.
    pub title: String,
    /// New content payload.
    pub content: Value,
}

/// Page persistence contract.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Loads the canonical record for a page.
    ///
    /// # Errors
    ///
    /// Returns [`PageStoreError::NotFound`] when the page does not exist.
    async fn load(&self, page_id: &PageId) -> PageStoreResult<PageRecord>;

    /// Replaces a page's title and content, returning the canonical record
    /// as persisted (the store stamps `last_modified_at`).
    ///
    /// # Errors
    ///
    /// Returns [`PageStoreError::NotFound`] when the page does not exist, or
    /// [`PageStoreError::Backend`] for platform failures.
    async fn save(&self, page_id: &PageId, update: SavePage) -> PageStoreResult<PageRecord>;

    /// Moves a page to trash, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`PageStoreError::NotFound`] when the page does not exist.
    async fn trash(&self, page_id: &PageId) -> PageStoreResult<PageRecord>;

    /// Subscribes to realtime change pushes for a page.
    ///
    /// Stores without realtime support return `Ok(None)`; the board core
    /// works without a feed.
    ///
    /// # Errors
    ///
    /// Returns [`PageStoreError::NotFound`] when the page does not exist.
    async fn subscribe(
        &self,
        page_id: &PageId,
    ) -> PageStoreResult<Option<broadcast::Receiver<PageRecord>>> {
        let _record = self.load(page_id).await?;
        Ok(None)
    }
}

/// Errors returned by page store implementations.
#[derive(Debug, Clone, Error)]
pub enum PageStoreError {
    /// The page was not found.
    #[error("page not found: {0}")]
    NotFound(PageId),

    /// Platform-side failure (network, auth, validation).
    #[error("page store error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl PageStoreError {
    /// Wraps a platform error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
