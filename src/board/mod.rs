//! Kanban board core for one board-type workspace page.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]: the [`domain::Board`] aggregate and its
//!   column/task records.
//! - Load-time content migration in [`migrate`].
//! - Port contracts in [`ports`]: the hosted data store and the native
//!   shell, both treated as black boxes.
//! - Adapter implementations in [`adapters`].
//! - Orchestration services in [`services`]: the editing session, the
//!   drag-reorder engine, and the autosave scheduler.

pub mod adapters;
pub mod domain;
pub mod migrate;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
