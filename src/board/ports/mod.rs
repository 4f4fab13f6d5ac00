//! Port contracts for the board core.
//!
//! Ports define infrastructure-agnostic interfaces to the two external
//! collaborators: the hosted data store and the native shell.

pub mod host;
pub mod page_store;

pub use host::{BrowserHost, DesktopShellHost, HostCapabilities};
pub use page_store::{
    PageKind, PageRecord, PageStore, PageStoreError, PageStoreResult, ParsePageKindError, SavePage,
};
