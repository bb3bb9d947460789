//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints (users, assets, requests, health)
//! - **Schemas**: The stored record types and the request/response bodies
//!   the endpoints exchange
//!
//! The generated specification is served by Swagger UI in debug builds.

use crate::api::requests::{
    CreateRequestBody, RequestCreatedResponse, RequestStatusResponse, UpdateStatusBody,
};
use crate::api::users::{
    ChangePasswordBody, ImageUpdatedResponse, PasswordChangedResponse, UpdateImageBody,
};
use crate::models::{Asset, AssetRequest, ErrorBody, User, UserSummary};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom backend API",
        description = "HTTP interface for users, assets, and asset requests backed by a flat JSON file.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::api::users::list_users,
        crate::api::users::update_user_image,
        crate::api::users::change_user_password,
        crate::api::assets::list_assets,
        crate::api::requests::create_request,
        crate::api::requests::list_requests,
        crate::api::requests::update_request_status,
        crate::api::health::ready,
        crate::api::health::live,
    ),
    components(schemas(
        User,
        UserSummary,
        Asset,
        AssetRequest,
        ErrorBody,
        UpdateImageBody,
        ChangePasswordBody,
        ImageUpdatedResponse,
        PasswordChangedResponse,
        CreateRequestBody,
        UpdateStatusBody,
        RequestCreatedResponse,
        RequestStatusResponse,
    )),
    tags(
        (name = "users", description = "Operations on user records"),
        (name = "assets", description = "Read-only asset catalogue"),
        (name = "requests", description = "Asset request lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
