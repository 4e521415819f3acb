use crate::common;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use server::api::{submit_password_change, HttpPasswordClient};
use shared_types::{PasswordField, SubmissionState, SubmitEffect};

#[tokio::test]
async fn valid_submit_against_real_backend_navigates_to_login() {
    let base = common::spawn_app().await;
    let client = HttpPasswordClient::new(base);
    let form = common::filled_form("abcdefgh", "abcdefgh");

    let effect = submit_password_change(&form, &client).await;

    assert_eq!(effect, SubmitEffect::NavigateToLogin);
    assert_eq!(form.borrow().state(), SubmissionState::Idle);
    assert!(form.borrow().errors().is_empty());
}

#[tokio::test]
async fn valid_submit_posts_only_the_password() {
    let (base, recorder) = common::spawn_recorder(StatusCode::OK).await;
    let client = HttpPasswordClient::new(base).with_platform("web");
    let form = common::filled_form("s3cure-pass", "s3cure-pass");

    submit_password_change(&form, &client).await;

    let requests = recorder.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, serde_json::json!({ "password": "s3cure-pass" }));
    assert_eq!(requests[0].platform.as_deref(), Some("web"));
}

#[tokio::test]
async fn invalid_input_never_reaches_the_network() {
    let (base, recorder) = common::spawn_recorder(StatusCode::OK).await;
    let client = HttpPasswordClient::new(base);

    let short = common::filled_form("abc", "abc");
    assert_eq!(
        submit_password_change(&short, &client).await,
        SubmitEffect::StayOnForm
    );
    assert_eq!(
        short.borrow().error(PasswordField::Password),
        Some("Password is too short")
    );

    let mismatched = common::filled_form("abcdefgh", "abcdefgx");
    assert_eq!(
        submit_password_change(&mismatched, &client).await,
        SubmitEffect::StayOnForm
    );
    assert_eq!(
        mismatched.borrow().error(PasswordField::ConfirmPassword),
        Some("Passwords do not match")
    );

    assert_eq!(recorder.hits(), 0);
}

#[tokio::test]
async fn server_error_keeps_user_on_form_without_messages() {
    let (base, recorder) = common::spawn_recorder(StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = HttpPasswordClient::new(base);
    let form = common::filled_form("abcdefgh", "abcdefgh");

    let effect = submit_password_change(&form, &client).await;

    assert_eq!(effect, SubmitEffect::StayOnForm);
    assert_eq!(recorder.hits(), 1);
    let form = form.borrow();
    assert_eq!(form.state(), SubmissionState::Idle);
    assert!(form.errors().is_empty());
    assert_eq!(form.password(), "abcdefgh");
}

#[tokio::test]
async fn unreachable_backend_keeps_user_on_form() {
    let client = HttpPasswordClient::new(common::unreachable_base_url().await);
    let form = common::filled_form("abcdefgh", "abcdefgh");

    let effect = submit_password_change(&form, &client).await;

    assert_eq!(effect, SubmitEffect::StayOnForm);
    assert_eq!(form.borrow().state(), SubmissionState::Idle);
    assert!(form.borrow().errors().is_empty());
}

#[tokio::test]
async fn each_valid_submit_sends_exactly_one_request() {
    let (base, recorder) = common::spawn_recorder(StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = HttpPasswordClient::new(base);
    let form = common::filled_form("abcdefgh", "abcdefgh");

    submit_password_change(&form, &client).await;
    submit_password_change(&form, &client).await;

    assert_eq!(recorder.hits(), 2);
}

#[tokio::test]
async fn concurrent_submits_share_one_request() {
    let (base, recorder) = common::spawn_recorder(StatusCode::OK).await;
    let client = HttpPasswordClient::new(base);
    let form = common::filled_form("abcdefgh", "abcdefgh");

    let (first, second) = tokio::join!(
        submit_password_change(&form, &client),
        submit_password_change(&form, &client)
    );

    assert_eq!(first, SubmitEffect::NavigateToLogin);
    assert_eq!(second, SubmitEffect::StayOnForm);
    assert_eq!(recorder.hits(), 1);
}
