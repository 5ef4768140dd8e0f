//! Response envelopes shared by every console endpoint.
//!
//! Successful reads answer `{ "success": true, "data": ... }`; commands and failures answer
//! `{ "success": bool, "message": "..." }`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Successful response carrying a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true` for this envelope
    pub success: bool,
    /// Response payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Response carrying only an outcome message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable outcome
    #[schema(example = "Verification approved")]
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
