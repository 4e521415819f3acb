use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "validation")]
use validator::{Validate, ValidationError};

/// Request body for `POST /noendpoint`.
///
/// Only the new password travels over the wire; the confirmation field is a
/// client-side concern.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct ChangePasswordRequest {
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "validate_password_length"))
    )]
    pub password: String,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Server-side twin of the client length rules, counted the same way.
#[cfg(feature = "validation")]
fn validate_password_length(password: &str) -> Result<(), ValidationError> {
    if crate::password_length_in_bounds(password) {
        return Ok(());
    }
    let mut err = ValidationError::new("length");
    err.message = Some("Password must be between 8 and 20 characters".into());
    Err(err)
}

/// Generic message response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}
