//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`extract`]**: JSON body extraction with enveloped rejections
//! - **[`models`]**: Request/response data structures shared by the server and the client
//!
//! # API Structure
//!
//! - **Realname certification** (`/certification/realname/*`): list, detail and audit
//! - **Navigation** (`/navigation/routes`): the console's route table
//!
//! API documentation is available at `/docs` when the server is running.

pub mod extract;
pub mod handlers;
pub mod models;
