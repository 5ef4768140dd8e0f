//! API request and response data models.
//!
//! These structures define the wire contract with the admin console. Every model serializes
//! with camelCase field names and is annotated with `utoipa` for the generated API docs.
//!
//! # Model Categories
//!
//! - [`certification`]: realname verification records, list filters and audit commands
//! - [`pilot`]: pilot certificate records, served by the client-side simulation
//! - [`device`]: device catalogue, specification groups and derived combinations
//! - [`inventory`]: per-location stock records and their status policy
//! - [`pagination`]: page requests and the page envelope returned by list endpoints
//! - [`envelope`]: the `success`/`data`/`message` response wrappers

pub mod certification;
pub mod device;
pub mod envelope;
pub mod inventory;
pub mod pagination;
pub mod pilot;
