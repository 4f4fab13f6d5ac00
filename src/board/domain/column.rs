//! Column records.

use super::{AccentColor, ColumnId};
use serde::{Deserialize, Serialize};

/// A named, ordered bucket of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Opaque stable identifier, unique within a board.
    pub id: ColumnId,
    /// Display name.
    pub title: String,
    /// Display accent, when assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<AccentColor>,
}

impl Column {
    /// Creates a fresh column with a trimmed title and a palette accent.
    pub fn new(title: impl Into<String>) -> Self {
        let id = ColumnId::generate();
        let color = AccentColor::for_column(&id);
        let raw: String = title.into();
        Self {
            id,
            title: raw.trim().to_owned(),
            color: Some(color),
        }
    }

    /// Reconstructs a column from persisted parts.
    pub fn from_parts(
        id: ColumnId,
        title: impl Into<String>,
        color: Option<AccentColor>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            color,
        }
    }
}
