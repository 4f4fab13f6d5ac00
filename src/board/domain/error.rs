//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain board values.
///
/// Mutations that merely reference a missing entity are deliberately *not*
/// errors: the board treats those as no-ops so rapid UI event races
/// (delete-then-edit) stay forgiving.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyCommentText,

    /// The task summary is empty after trimming a committed edit.
    #[error("task summary must not be empty")]
    EmptyTaskSummary,
}

/// Error returned while parsing an issue type from persisted content.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue type: {0}")]
pub struct ParseIssueTypeError(pub String);

/// Error returned while parsing a priority from persisted content.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
