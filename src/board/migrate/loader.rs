//! One-shot decode of raw page content into a [`Board`].
//!
//! Runs once when a page is opened (and never again on ordinary content
//! mutation). Unreadable content falls back to the starter board instead of
//! failing to render; losing a corrupt payload is preferred over bricking
//! the page, and the returned [`ContentShape`] lets callers log when that
//! happens.

use super::shape::{CurrentContent, EncodedContent, LegacyContent};
use crate::board::domain::{Board, Column, Task};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

/// Which persisted shape the loader recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    /// No content stored yet (first open of the page).
    Missing,
    /// Historical object-keyed shape; the board was migrated.
    Legacy,
    /// Current flat-array shape; passed through.
    Current,
    /// Content present but unreadable; the starter board was substituted.
    Unrecognized,
}

impl ContentShape {
    /// Returns a short tag for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Legacy => "legacy",
            Self::Current => "current",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Errors produced while decoding persisted content.
#[derive(Debug, Error)]
pub enum ContentDecodeError {
    /// The payload is not a JSON object.
    #[error("board content is not a JSON object")]
    NotAnObject,

    /// The payload is an object but does not match a known shape.
    #[error("board content does not match a known shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Decodes raw persisted content, falling back to the starter board.
///
/// Never fails: the fallback is an explicit policy branch, not a swallowed
/// error. The shape tag reports what was found so callers can surface
/// migration and corruption events.
#[must_use]
pub fn load_board(content: Option<&Value>) -> (Board, ContentShape) {
    let Some(value) = content else {
        info!("no stored board content, seeding starter board");
        return (Board::starter(), ContentShape::Missing);
    };
    match decode_content(value) {
        Ok((board, shape)) => {
            if shape == ContentShape::Legacy {
                info!(
                    columns = board.columns().len(),
                    tasks = board.tasks().len(),
                    "migrated legacy board content"
                );
            }
            (board, shape)
        }
        Err(err) => {
            warn!(error = %err, "unreadable board content, seeding starter board");
            (Board::starter(), ContentShape::Unrecognized)
        }
    }
}

/// Strictly decodes content that is present, reporting the recognised shape.
///
/// This is the policy-free sibling of [`load_board`]: callers that want to
/// know *why* a payload is unreadable (telemetry, admin tooling) get the
/// error instead of the silent starter-board fallback.
///
/// # Errors
///
/// Returns [`ContentDecodeError`] when the payload is not an object or does
/// not deserialise as either known shape.
pub fn decode_content(value: &Value) -> Result<(Board, ContentShape), ContentDecodeError> {
    let Some(map) = value.as_object() else {
        return Err(ContentDecodeError::NotAnObject);
    };

    // The historical shape is identified by its explicit order array next to
    // an object-keyed (not array) columns field.
    let looks_legacy = map.contains_key("columnOrder")
        && map.get("columns").is_some_and(Value::is_object);
    if looks_legacy {
        let legacy: LegacyContent = serde_json::from_value(value.clone())?;
        return Ok((legacy.into_board(), ContentShape::Legacy));
    }

    let current: CurrentContent = serde_json::from_value(value.clone())?;
    let columns = current.columns;
    let tasks: Vec<Task> = current
        .tasks
        .into_iter()
        .map(super::shape::RawTask::into_task)
        .collect();
    Ok((Board::new(columns, tasks), ContentShape::Current))
}

/// Serialises columns and tasks into the current persisted shape.
///
/// # Errors
///
/// Returns the underlying `serde_json` error when serialisation fails.
pub fn encode_content(columns: &[Column], tasks: &[Task]) -> serde_json::Result<Value> {
    serde_json::to_value(EncodedContent { columns, tasks })
}

/// Strictly decodes current-shape content for snapshot comparison.
///
/// Returns `None` for anything other than a well-formed current shape; the
/// autosave scheduler then treats the local state as differing, which is
/// exactly right for a page whose stored payload is still legacy or
/// unreadable.
#[must_use]
pub(crate) fn decode_current_content(value: &Value) -> Option<(Vec<Column>, Vec<Task>)> {
    if value
        .as_object()
        .is_some_and(|map| map.contains_key("columnOrder"))
    {
        return None;
    }
    let current: CurrentContent = serde_json::from_value(value.clone()).ok()?;
    let tasks = current
        .tasks
        .into_iter()
        .map(super::shape::RawTask::into_task)
        .collect();
    Some((current.columns, tasks))
}
