//! HTTP request handlers.
//!
//! - [`certification`]: realname verification list, detail and audit
//! - [`navigation`]: the console route table
//!
//! Handlers return [`crate::errors::Error`], which converts into the console's
//! `{ "success": false, "message": ... }` envelope with a matching status code.

pub mod certification;
pub mod navigation;
