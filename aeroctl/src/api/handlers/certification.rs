//! HTTP handlers for realname certification review.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    api::extract::ConsoleJson,
    api::models::{
        certification::{AuditRequest, RealnameListQuery, RealnameVerification},
        envelope::{ApiResponse, MessageResponse},
        pagination::Page,
    },
    errors::{Error, Result},
    types::RealnameId,
};

/// List realname verification records.
///
/// A missing body is treated like an empty filter; a malformed one is a 400.
#[utoipa::path(
    post,
    path = "/certification/realname/list",
    tag = "certification",
    summary = "List realname verifications",
    description = "Filter by name and identity number (substring) and status (exact), then page the result.",
    request_body(content = RealnameListQuery, description = "Filters and page window, all optional"),
    responses(
        (status = 200, description = "Page of matching records", body = ApiResponse<Page<RealnameVerification>>),
        (status = 400, description = "Malformed filter body", body = MessageResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_realname(
    State(state): State<AppState>,
    body: Option<ConsoleJson<RealnameListQuery>>,
) -> Result<Json<ApiResponse<Page<RealnameVerification>>>> {
    let query = body.map(|ConsoleJson(query)| query).unwrap_or_default();
    let page = state.realname.list(&query, state.config.pagination.default_page_size);
    Ok(Json(ApiResponse::ok(page)))
}

/// Get one realname verification record.
#[utoipa::path(
    get,
    path = "/certification/realname/detail/{id}",
    tag = "certification",
    summary = "Get realname verification",
    params(
        ("id" = i64, Path, description = "Record ID"),
    ),
    responses(
        (status = 200, description = "The record", body = ApiResponse<RealnameVerification>),
        (status = 404, description = "No record with this ID", body = MessageResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_realname(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RealnameVerification>>> {
    // A non-numeric id can't match any record
    let id: RealnameId = id.parse().map_err(|_| Error::realname_not_found(&id))?;
    let record = state.realname.get(id)?;
    Ok(Json(ApiResponse::ok(record)))
}

/// Approve or reject a realname verification record.
#[utoipa::path(
    post,
    path = "/certification/realname/audit",
    tag = "certification",
    summary = "Audit realname verification",
    description = "Overwrite the record's status. A reject reason is stored only when rejecting; approving clears it.",
    request_body = AuditRequest,
    responses(
        (status = 200, description = "Decision stored", body = MessageResponse),
        (status = 400, description = "Malformed audit command", body = MessageResponse),
        (status = 404, description = "No record with this ID", body = MessageResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn audit_realname(
    State(state): State<AppState>,
    ConsoleJson(request): ConsoleJson<AuditRequest>,
) -> Result<Json<MessageResponse>> {
    let message = state.realname.audit(&request)?;
    Ok(Json(MessageResponse::ok(message)))
}
