//! Editing session for one open kanban page.
//!
//! The session is the single owner of the in-memory board: UI events mutate
//! it synchronously here, the reorder engine splices through it during a
//! drag, and the autosave scheduler observes it via value snapshots. No
//! other code holds the board, so there is nothing to lock.

use crate::board::domain::{
    Attachment, Board, BoardDomainError, Column, ColumnId, Comment, PageId, Task, TaskId,
};
use crate::board::migrate::{self, ContentShape};
use crate::board::ports::{HostCapabilities, PageKind, PageRecord};
use serde_json::Value;
use thiserror::Error;

/// Title shown when a page has none.
const UNTITLED: &str = "Untitled";

/// Errors returned while opening an editing session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The record belongs to a page of a different kind.
    #[error("page {page} holds {kind:?} content, not a kanban board")]
    NotKanban {
        /// Page that was opened.
        page: PageId,
        /// Kind the record actually holds.
        kind: PageKind,
    },
}

/// Deep-comparable value of everything the page persists.
///
/// The autosave scheduler compares snapshots structurally, so recomputed but
/// unchanged state never triggers a save and content changes are never
/// missed on the strength of a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Page title at snapshot time.
    pub title: String,
    /// Columns in display order.
    pub columns: Vec<Column>,
    /// Flat task list.
    pub tasks: Vec<Task>,
}

impl BoardSnapshot {
    /// Serialises the snapshot's board into the current persisted shape.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when serialisation fails.
    pub fn to_content(&self) -> serde_json::Result<Value> {
        migrate::encode_content(&self.columns, &self.tasks)
    }

    /// Rebuilds a snapshot from a canonical store record.
    ///
    /// Returns `None` when the record holds no content or content that is
    /// not the current shape; callers treat that as "local state differs",
    /// which schedules the (migrated) local state for persistence.
    #[must_use]
    pub fn from_record(record: &PageRecord) -> Option<Self> {
        let content = record.content.as_ref()?;
        let (columns, tasks) = migrate::decode_current_content(content)?;
        Some(Self {
            title: record.title.clone(),
            columns,
            tasks,
        })
    }
}

/// Owns the board and page title for the currently open kanban page.
pub struct BoardSession {
    page_id: PageId,
    title: String,
    board: Board,
    editing_task: Option<TaskId>,
    desktop: bool,
    loaded_shape: ContentShape,
}

impl BoardSession {
    /// Opens an editing session over a loaded page record.
    ///
    /// Content migration runs here, once per opened page; re-opening another
    /// page means opening another session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotKanban`] when the record is not a kanban
    /// page.
    pub fn open(record: &PageRecord, host: &dyn HostCapabilities) -> Result<Self, SessionError> {
        if record.kind != PageKind::Kanban {
            return Err(SessionError::NotKanban {
                page: record.id.clone(),
                kind: record.kind,
            });
        }
        let (board, loaded_shape) = migrate::load_board(record.content.as_ref());
        let title = if record.title.trim().is_empty() {
            UNTITLED.to_owned()
        } else {
            record.title.clone()
        };
        Ok(Self {
            page_id: record.id.clone(),
            title,
            board,
            editing_task: None,
            desktop: host.is_desktop(),
            loaded_shape,
        })
    }

    /// Returns the open page's identifier.
    #[must_use]
    pub const fn page_id(&self) -> &PageId {
        &self.page_id
    }

    /// Returns the page title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board for splicing by the reorder engine.
    pub const fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Returns which persisted shape the page content was loaded from.
    #[must_use]
    pub const fn loaded_shape(&self) -> ContentShape {
        self.loaded_shape
    }

    /// Returns `true` when the session runs inside the desktop shell.
    #[must_use]
    pub const fn is_desktop(&self) -> bool {
        self.desktop
    }

    /// Sets the page title, falling back to "Untitled" for blank input.
    pub fn set_title(&mut self, title: &str) {
        let trimmed = title.trim();
        self.title = if trimmed.is_empty() {
            UNTITLED.to_owned()
        } else {
            trimmed.to_owned()
        };
    }

    /// Returns the task currently open in the detail editor, if any.
    #[must_use]
    pub fn editing_task(&self) -> Option<&Task> {
        self.editing_task.as_ref().and_then(|id| self.board.task(id))
    }

    /// Replaces a task wholesale with its edited value.
    ///
    /// Returns `true` when applied; unknown ids are a no-op.
    pub fn update_task_details(&mut self, updated: Task) -> bool {
        self.board.update_task_details(updated)
    }

    /// Commits an inline summary edit on a task.
    ///
    /// Unknown ids are a no-op (`Ok(false)`).
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskSummary`] when the text is empty
    /// after trimming.
    pub fn commit_task_summary(
        &mut self,
        task_id: &TaskId,
        summary: &str,
    ) -> Result<bool, BoardDomainError> {
        let Some(task) = self.board.task_mut(task_id) else {
            return Ok(false);
        };
        task.commit_summary(summary)?;
        Ok(true)
    }

    /// Appends a comment to a task. Unknown ids are a no-op.
    pub fn add_comment(&mut self, task_id: &TaskId, comment: Comment) -> bool {
        let Some(task) = self.board.task_mut(task_id) else {
            return false;
        };
        task.comments.push(comment);
        true
    }

    /// Appends an attachment descriptor to a task. Unknown ids are a no-op.
    pub fn add_attachment(&mut self, task_id: &TaskId, attachment: Attachment) -> bool {
        let Some(task) = self.board.task_mut(task_id) else {
            return false;
        };
        task.attachments.push(attachment);
        true
    }

    /// Deletes a task, closing the detail editor if it showed that task.
    pub fn delete_task(&mut self, task_id: &TaskId) -> bool {
        let deleted = self.board.delete_task(task_id);
        if deleted && self.editing_task.as_ref() == Some(task_id) {
            self.editing_task = None;
        }
        deleted
    }

    /// Renames a column.
    pub fn rename_column(&mut self, column_id: &ColumnId, title: &str) -> bool {
        self.board.rename_column(column_id, title)
    }

    /// Deletes a column and, by cascade, its tasks; the detail editor is
    /// closed if its task went with the column.
    pub fn delete_column(&mut self, column_id: &ColumnId) -> bool {
        let deleted = self.board.delete_column(column_id);
        if deleted {
            let editing_gone = self
                .editing_task
                .as_ref()
                .is_some_and(|id| self.board.task(id).is_none());
            if editing_gone {
                self.editing_task = None;
            }
        }
        deleted
    }

    /// Appends a new column.
    pub fn add_column(&mut self, title: &str) -> ColumnId {
        self.board.add_column(title)
    }

    /// Appends a new placeholder task to a column and opens it in the
    /// detail editor. Unknown columns are a no-op.
    pub fn add_task(&mut self, column_id: &ColumnId) -> Option<TaskId> {
        let task_id = self.board.add_task(column_id)?;
        self.editing_task = Some(task_id.clone());
        Some(task_id)
    }

    /// Opens an existing task in the detail editor. Unknown ids are a no-op.
    pub fn edit_task(&mut self, task_id: &TaskId) -> bool {
        if self.board.task(task_id).is_some() {
            self.editing_task = Some(task_id.clone());
            true
        } else {
            false
        }
    }

    /// Closes the detail editor.
    pub fn close_editor(&mut self) {
        self.editing_task = None;
    }

    /// Captures the current persistable state for the autosave scheduler.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            title: self.title.clone(),
            columns: self.board.columns().to_vec(),
            tasks: self.board.tasks().to_vec(),
        }
    }
}
