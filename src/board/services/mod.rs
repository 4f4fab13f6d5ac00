//! Orchestration services for the board core.
//!
//! [`session`] owns the open page's state, [`reorder`] turns drag gestures
//! into ordering mutations on it, and [`autosave`] observes it and flushes
//! snapshots to the page store.

pub mod autosave;
pub mod reorder;
pub mod session;

pub use autosave::{
    AutosaveConfig, AutosaveEvent, AutosaveHandle, SaveStatus, spawn_autosave,
};
pub use reorder::{DragItem, DragState, DragTarget, ReorderEngine};
pub use session::{BoardSession, BoardSnapshot, SessionError};
