//! In-memory data stores backing the mock endpoints.
//!
//! Stores live for as long as the [`crate::AppState`] that owns them and are never persisted.
//! [`generator`] fabricates the fixture records a store starts with.

pub mod generator;
pub mod realname;

pub use realname::RealnameStore;
