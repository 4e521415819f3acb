use axum::{routing::get, Json, Router};
use shared_types::{AppError, AppErrorKind, ChangePasswordRequest, MessageResponse};
use utoipa::OpenApi;

use crate::health::{self, HealthResponse};
use crate::rest;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(rest::password::change_password, health::health_check),
    components(schemas(
        ChangePasswordRequest,
        MessageResponse,
        AppError,
        AppErrorKind,
        HealthResponse
    )),
    tags(
        (name = "auth", description = "Password change endpoint"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Password Reset API",
        description = "Backend for the Set New Password view",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Serve the generated document at `/api-docs/openapi.json`.
pub fn openapi_router() -> Router {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
