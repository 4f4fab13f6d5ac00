//! Adapter implementations of the board ports.
//!
//! Production deployments bind the ports to the hosted platform's client
//! SDK; the crate ships the in-memory adapter used by tests and
//! self-contained hosts.

pub mod memory;
