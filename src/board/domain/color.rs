//! Accent colours for board columns.
//!
//! Colours are picked from a fixed palette by hashing the column id, so a
//! freshly generated column lands on an effectively random palette entry
//! while re-running migration on the same legacy column stays stable.

use super::ColumnId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Palette of column accent colours (`#RRGGBB`).
const PALETTE: &[&str] = &[
    "#3B82F6", // blue
    "#EF4444", // red
    "#EAB308", // yellow
    "#8B5CF6", // purple
    "#16A34A", // green
    "#6B7280", // grey
    "#F97316", // orange
];

/// Accent colour shown on a column header, as a `#RRGGBB` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccentColor(String);

impl AccentColor {
    /// Creates an accent colour from a persisted value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Picks a palette colour for the given column id.
    ///
    /// The first byte of a SHA-256 digest of the id indexes the palette, so
    /// the assignment is deterministic per id and uniformly spread across
    /// generated ids.
    #[must_use]
    pub fn for_column(id: &ColumnId) -> Self {
        let digest = Sha256::digest(id.as_str().as_bytes());
        let byte = digest.as_slice().first().copied().unwrap_or_default();
        let index = usize::from(byte)
            .checked_rem(PALETTE.len())
            .unwrap_or_default();
        let hex = PALETTE.get(index).copied().unwrap_or("#3B82F6");
        Self(hex.to_owned())
    }

    /// Returns the colour as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the colour is one of the palette entries.
    #[must_use]
    pub fn is_palette_entry(&self) -> bool {
        PALETTE.contains(&self.0.as_str())
    }
}

impl AsRef<str> for AccentColor {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
