//! Unit and orchestration tests for the board core.

mod autosave_tests;
mod migrate_tests;
