//! Schedulr: board core of the productivity workspace application.
//!
//! Schedulr pages delegate persistence, auth, and realtime sync to a hosted
//! data store platform; what remains client-side is state the user is
//! actively editing. This crate implements that stateful core for kanban
//! pages (the board model, drag reordering, and debounced autosave) so a
//! UI shell only has to render it and forward events.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the data store and the shell
//! - **Adapters**: Concrete implementations of ports
//! - **Services**: The editing session, reorder engine, and autosave
//!   scheduler that orchestrate a page's lifetime
//!
//! # Modules
//!
//! - [`board`]: the kanban board bounded context

pub mod board;
