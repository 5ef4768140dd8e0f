//! OpenAPI document for the console API, served at `/api-docs/openapi.json` and rendered with
//! Scalar at `/docs`.

use utoipa::OpenApi;

use crate::api;
use crate::api::models::{
    certification::{AuditDecision, AuditRequest, RealnameListQuery, RealnameVerification, VerificationStatus},
    device::{
        Device, DeviceCategory, DeviceOption, DeviceParameter, DeviceStatus, ParamGroup, SearchParams, SpecCombination,
        SpecDetail, SpecGroup, SpecOption, SpecValue,
    },
    envelope::MessageResponse,
    inventory::{InventoryPolicy, InventoryRecord, InventoryStatus},
    pagination::PageRequest,
    pilot::{PilotListQuery, PilotVerification},
};
use crate::navigation::{RouteComponent, RouteMeta, RouteRecord};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "aeroctl console API",
        description = "Mock backend for the drone-rental admin console: realname certification review and the console route table."
    ),
    paths(
        api::handlers::certification::list_realname,
        api::handlers::certification::get_realname,
        api::handlers::certification::audit_realname,
        api::handlers::navigation::list_routes,
    ),
    components(
        schemas(
            RealnameVerification,
            RealnameListQuery,
            AuditRequest,
            AuditDecision,
            VerificationStatus,
            PilotVerification,
            PilotListQuery,
            PageRequest,
            MessageResponse,
            RouteRecord,
            RouteMeta,
            RouteComponent,
            // Shapes shared with the console's device pages
            Device,
            DeviceStatus,
            DeviceCategory,
            DeviceParameter,
            DeviceOption,
            SpecDetail,
            SpecOption,
            SpecValue,
            SpecGroup,
            SpecCombination,
            ParamGroup,
            SearchParams,
            InventoryRecord,
            InventoryStatus,
            InventoryPolicy,
        )
    ),
    tags(
        (name = "certification", description = "Realname verification review"),
        (name = "navigation", description = "Console route table"),
    )
)]
pub struct ApiDoc;
