use crate::common;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use server::api::{HttpPasswordClient, PasswordClient};
use shared_types::{AppErrorKind, ChangePasswordRequest};

fn request(password: &str) -> ChangePasswordRequest {
    ChangePasswordRequest {
        password: password.to_string(),
    }
}

#[tokio::test]
async fn accepted_password_is_ok() {
    let client = HttpPasswordClient::new(common::spawn_app().await);
    assert!(client.change_password(&request("abcdefgh")).await.is_ok());
}

#[tokio::test]
async fn backend_validation_error_is_decoded() {
    let client = HttpPasswordClient::new(common::spawn_app().await);

    let err = client
        .change_password(&request(&"x".repeat(21)))
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("password"));
}

#[tokio::test]
async fn json_error_body_is_preferred_over_status() {
    let (base, _recorder) = common::spawn_recorder(StatusCode::BAD_GATEWAY).await;
    let client = HttpPasswordClient::new(base);

    let err = client.change_password(&request("abcdefgh")).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert_eq!(err.message, "backend exploded");
}

#[tokio::test]
async fn connection_failure_is_unavailable() {
    let client = HttpPasswordClient::new(common::unreachable_base_url().await);

    let err = client.change_password(&request("abcdefgh")).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unavailable);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let base = common::spawn_app().await;
    let client = HttpPasswordClient::new(format!("{base}/"));
    assert!(client.change_password(&request("abcdefgh")).await.is_ok());
}
