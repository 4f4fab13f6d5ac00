//! Identifier newtypes for the board domain.
//!
//! Board identifiers are opaque strings. Freshly created entities get a
//! generated `id_`-prefixed value; identifiers loaded from persisted content
//! are accepted verbatim (legacy boards use short hand-written ids such as
//! `"todo"`), so none of these types validate their input.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Renders a fresh collision-resistant opaque identifier.
fn generated() -> String {
    format!("id_{}", Uuid::new_v4().simple())
}

/// Unique identifier for a board column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Creates a column identifier from a persisted value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Creates a fresh random column identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(generated())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColumnId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a board task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task identifier from a persisted value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Creates a fresh random task identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(generated())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a workspace page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Creates a page identifier from a persisted value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Creates a fresh random page identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(generated())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders a fresh opaque identifier for leaf records (comments,
/// attachments) that are stored as plain strings.
#[must_use]
pub fn fresh_record_id() -> String {
    generated()
}
