//! Client side of the password change call.
//!
//! Compiled for every platform: the Dioxus view drives
//! [`submit_password_change`] with an [`HttpPasswordClient`].

use std::cell::RefCell;

use dioxus::prelude::*;
use shared_types::{
    AppError, ChangePasswordForm, ChangePasswordRequest, SubmitAttempt, SubmitEffect,
    CHANGE_PASSWORD_PATH,
};

/// Used when `API_BASE_URL` is not set at runtime or compile time.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";

/// Sends a validated password change to the backend.
#[allow(async_fn_in_trait)]
pub trait PasswordClient {
    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), AppError>;
}

/// `reqwest`-backed client posting JSON to `<base>/noendpoint`.
#[derive(Debug, Clone)]
pub struct HttpPasswordClient {
    http: reqwest::Client,
    base_url: String,
    platform: Option<&'static str>,
}

impl HttpPasswordClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            platform: None,
        }
    }

    /// Base URL from `API_BASE_URL` (runtime, then build time), or the default.
    pub fn from_env() -> Self {
        let base_url = std::env::var("API_BASE_URL")
            .ok()
            .or_else(|| option_env!("API_BASE_URL").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Tag requests with an `x-client-platform` header.
    pub fn with_platform(mut self, platform: &'static str) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CHANGE_PASSWORD_PATH)
    }
}

impl PasswordClient for HttpPasswordClient {
    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), AppError> {
        let mut builder = self.http.post(self.endpoint()).json(request);
        if let Some(platform) = self.platform {
            builder = builder.header("x-client-platform", platform);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::unavailable(format!("Password change request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::from_server_error(&body)
            .unwrap_or_else(|| AppError::from_status(status.as_u16())))
    }
}

/// Short-lived mutable access to the form state.
///
/// Implementations must not hold the borrow across the network await;
/// [`submit_password_change`] only touches the form before and after it.
pub trait FormHandle {
    fn update<R>(&mut self, f: impl FnOnce(&mut ChangePasswordForm) -> R) -> R;
}

impl FormHandle for Signal<ChangePasswordForm> {
    fn update<R>(&mut self, f: impl FnOnce(&mut ChangePasswordForm) -> R) -> R {
        let mut form = self.write();
        f(&mut *form)
    }
}

impl FormHandle for &RefCell<ChangePasswordForm> {
    fn update<R>(&mut self, f: impl FnOnce(&mut ChangePasswordForm) -> R) -> R {
        let mut form = self.borrow_mut();
        f(&mut *form)
    }
}

/// Run one submit attempt: validate, send at most one request, settle.
///
/// Attempts made while a request is in flight return immediately, so racing
/// submits against the same form produce a single HTTP call.
pub async fn submit_password_change<H, C>(mut form: H, client: &C) -> SubmitEffect
where
    H: FormHandle,
    C: PasswordClient,
{
    let request = match form.update(ChangePasswordForm::begin_submit) {
        SubmitAttempt::Send(request) => request,
        SubmitAttempt::Busy => {
            tracing::debug!("password change already in flight; ignoring submit");
            return SubmitEffect::StayOnForm;
        }
        SubmitAttempt::Invalid => {
            tracing::debug!("password change rejected by form validation");
            return SubmitEffect::StayOnForm;
        }
    };

    tracing::info!("submitting password change");
    let outcome = client.change_password(&request).await;
    if let Err(err) = &outcome {
        // Not shown to the user; the busy indicator just clears.
        tracing::warn!(error = %err, "password change failed");
    }

    form.update(|f| f.complete(outcome))
}
