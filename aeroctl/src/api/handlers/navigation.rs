//! HTTP handler exposing the console route table.

use axum::Json;

use crate::api::models::envelope::ApiResponse;
use crate::navigation::{self, RouteRecord};

#[utoipa::path(
    get,
    path = "/navigation/routes",
    tag = "navigation",
    summary = "Route table",
    description = "Console sections and their pages, sections ordered by menu rank.",
    responses(
        (status = 200, description = "Route table", body = ApiResponse<Vec<RouteRecord>>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_routes() -> Json<ApiResponse<Vec<RouteRecord>>> {
    Json(ApiResponse::ok(navigation::route_table()))
}
