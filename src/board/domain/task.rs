//! Task records and their categorisation enums.
//!
//! Tasks are plain serialisable records: the editor panel replaces a task
//! wholesale on save, so fields are public and the aggregate-level rules
//! (membership, ordering, cascade) live on [`super::Board`].

use super::{BoardDomainError, ColumnId, ParseIssueTypeError, ParsePriorityError, TaskId, ids};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Category of work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    /// Plain unit of work.
    Task,
    /// Defect report.
    Bug,
    /// User-facing story.
    Story,
    /// Feature request.
    #[serde(rename = "Feature request")]
    FeatureRequest,
    /// Security issue.
    Security,
}

impl IssueType {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::Bug => "Bug",
            Self::Story => "Story",
            Self::FeatureRequest => "Feature request",
            Self::Security => "Security",
        }
    }
}

impl TryFrom<&str> for IssueType {
    type Error = ParseIssueTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "Task" => Ok(Self::Task),
            "Bug" => Ok(Self::Bug),
            "Story" => Ok(Self::Story),
            "Feature request" => Ok(Self::FeatureRequest),
            "Security" => Ok(Self::Security),
            _ => Err(ParseIssueTypeError(value.to_owned())),
        }
    }
}

/// Relative importance of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default urgency.
    Medium,
    /// Should be picked up soon.
    High,
    /// Drop everything.
    Urgent,
}

impl Priority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            "Urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// A comment left on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Opaque comment identifier.
    pub id: String,
    /// Identifier of the authoring user, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    /// Email of the authoring user, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    /// Display name of the authoring user, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Comment body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment with trimmed text and a clock-supplied timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyCommentText`] when the text is empty
    /// after trimming.
    pub fn new(text: &str, clock: &impl Clock) -> Result<Self, BoardDomainError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyCommentText);
        }
        Ok(Self {
            id: ids::fresh_record_id(),
            author_id: None,
            author_email: None,
            author_name: None,
            text: trimmed.to_owned(),
            created_at: clock.utc(),
        })
    }

    /// Sets the authoring user's identifier.
    #[must_use]
    pub fn with_author_id(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = Some(author_id.into());
        self
    }

    /// Sets the authoring user's email.
    #[must_use]
    pub fn with_author_email(mut self, author_email: impl Into<String>) -> Self {
        self.author_email = Some(author_email.into());
        self
    }

    /// Sets the authoring user's display name.
    #[must_use]
    pub fn with_author_name(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = Some(author_name.into());
        self
    }
}

/// A file attached to a task.
///
/// The binary itself lives in the data store's object storage; the task only
/// carries the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Opaque attachment identifier.
    pub id: String,
    /// Original file name.
    pub name: String,
    /// Public URL of the stored object.
    pub url: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME type reported at upload time.
    pub mime_type: String,
}

impl Attachment {
    /// Creates an attachment descriptor with a fresh identifier.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            id: ids::fresh_record_id(),
            name: name.into(),
            url: url.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

/// A unit of work belonging to exactly one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque stable identifier, unique within a board.
    pub id: TaskId,
    /// Owning column. Always references an existing column on the board.
    pub column_id: ColumnId,
    /// One-line description. Required; non-empty once an edit is committed.
    pub summary: String,
    /// Longer free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category of work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
    /// Assigned user reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Scheduled start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// Scheduled end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Relative importance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Comments in creation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    /// Attachments in upload order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Task {
    /// Summary given to tasks created before the user types anything.
    pub const PLACEHOLDER_SUMMARY: &'static str = "New task";

    /// Creates a fresh task in the given column with a placeholder summary.
    #[must_use]
    pub fn new(column_id: ColumnId) -> Self {
        Self {
            id: TaskId::generate(),
            column_id,
            summary: Self::PLACEHOLDER_SUMMARY.to_owned(),
            description: None,
            issue_type: None,
            assignee: None,
            start_date: None,
            end_date: None,
            priority: None,
            comments: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Commits an edited summary, trimming surrounding whitespace.
    ///
    /// The UI may hold a transient empty value while the user types; this is
    /// the commit-time validation.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskSummary`] when the text is empty
    /// after trimming.
    pub fn commit_summary(&mut self, summary: &str) -> Result<(), BoardDomainError> {
        let trimmed = summary.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskSummary);
        }
        self.summary = trimmed.to_owned();
        Ok(())
    }
}
