use crate::{
    validate_password_change, AppError, ChangePasswordRequest, PasswordChangeInput, PasswordField,
    PasswordFieldErrors,
};

/// Whether a password change request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Result of pressing submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Input is valid and the form is now `Submitting`; send this body.
    Send(ChangePasswordRequest),
    /// Validation failed; errors are stored on the form.
    Invalid,
    /// A request is already in flight; nothing happened.
    Busy,
}

/// What the view should do once a submission settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitEffect {
    NavigateToLogin,
    StayOnForm,
}

/// Live state of the "Set New Password" form.
///
/// Field edits do not revalidate; errors are refreshed on each submit attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangePasswordForm {
    input: PasswordChangeInput,
    errors: PasswordFieldErrors,
    state: SubmissionState,
}

impl ChangePasswordForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn password(&self) -> &str {
        &self.input.password
    }

    pub fn confirm_password(&self) -> &str {
        &self.input.confirm_password
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.input.password = value.into();
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.input.confirm_password = value.into();
    }

    /// Message shown under `field`, if the last submit attempt flagged it.
    pub fn error(&self, field: PasswordField) -> Option<&'static str> {
        self.errors.message(field)
    }

    pub fn errors(&self) -> &PasswordFieldErrors {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Validate and, if the input passes, move to `Submitting`.
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.is_submitting() {
            return SubmitAttempt::Busy;
        }

        match validate_password_change(&self.input) {
            Ok(valid) => {
                self.errors = PasswordFieldErrors::default();
                self.state = SubmissionState::Submitting;
                SubmitAttempt::Send(valid.into_request())
            }
            Err(errors) => {
                self.errors = errors;
                SubmitAttempt::Invalid
            }
        }
    }

    /// Settle the in-flight request. Failures leave no trace on the form.
    pub fn complete(&mut self, outcome: Result<(), AppError>) -> SubmitEffect {
        self.state = SubmissionState::Idle;
        match outcome {
            Ok(()) => SubmitEffect::NavigateToLogin,
            Err(_) => SubmitEffect::StayOnForm,
        }
    }
}
