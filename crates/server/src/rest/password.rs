use axum::{http::HeaderMap, Json};
use shared_types::{AppError, ChangePasswordRequest, MessageResponse};

use crate::error_convert::ValidateRequest;

/// Accept a new password.
///
/// Placeholder backend for the "Set New Password" view: the body is
/// validated and acknowledged, nothing is stored.
#[utoipa::path(
    post,
    path = "/noendpoint",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password accepted", body = MessageResponse),
        (status = 422, description = "Password failed validation", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(headers, payload))]
pub async fn change_password(
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate_request()?;

    let platform = headers
        .get("x-client-platform")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    tracing::info!(client.platform = platform, "password change accepted");

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}
