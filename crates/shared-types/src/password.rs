//! Validation rules for the "Set New Password" form.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AppError, ChangePasswordRequest};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 20;

/// Raw values of the two password inputs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeInput {
    pub password: String,
    pub confirm_password: String,
}

impl PasswordChangeInput {
    pub fn new(password: impl Into<String>, confirm_password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }
}

impl fmt::Debug for PasswordChangeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChangeInput")
            .field("password", &"[redacted]")
            .field("confirm_password", &"[redacted]")
            .finish()
    }
}

/// A form field that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PasswordField {
    Password,
    ConfirmPassword,
}

impl PasswordField {
    /// Field name as used in error maps and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordField::Password => "password",
            PasswordField::ConfirmPassword => "confirmPassword",
        }
    }
}

impl fmt::Display for PasswordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRuleViolation {
    TooShort,
    TooLong,
    Mismatch,
}

impl PasswordRuleViolation {
    pub fn message(&self) -> &'static str {
        match self {
            PasswordRuleViolation::TooShort => "Password is too short",
            PasswordRuleViolation::TooLong => "Password is too long",
            PasswordRuleViolation::Mismatch => "Passwords do not match",
        }
    }
}

impl fmt::Display for PasswordRuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

struct PasswordRule {
    field: PasswordField,
    check: fn(&PasswordChangeInput) -> Option<PasswordRuleViolation>,
}

// Evaluated top to bottom; a field keeps the first violation it gets.
const PASSWORD_RULES: &[PasswordRule] = &[
    PasswordRule {
        field: PasswordField::Password,
        check: too_short,
    },
    PasswordRule {
        field: PasswordField::Password,
        check: too_long,
    },
    PasswordRule {
        field: PasswordField::ConfirmPassword,
        check: mismatch,
    },
];

/// Length in UTF-16 code units, the unit browsers report for input values.
/// Characters outside the Basic Multilingual Plane count twice.
pub fn password_length(password: &str) -> usize {
    password.encode_utf16().count()
}

/// Whether `password` is between [`MIN_PASSWORD_LENGTH`] and
/// [`MAX_PASSWORD_LENGTH`] units long.
pub fn password_length_in_bounds(password: &str) -> bool {
    (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&password_length(password))
}

fn too_short(input: &PasswordChangeInput) -> Option<PasswordRuleViolation> {
    (password_length(&input.password) < MIN_PASSWORD_LENGTH)
        .then_some(PasswordRuleViolation::TooShort)
}

fn too_long(input: &PasswordChangeInput) -> Option<PasswordRuleViolation> {
    (password_length(&input.password) > MAX_PASSWORD_LENGTH)
        .then_some(PasswordRuleViolation::TooLong)
}

fn mismatch(input: &PasswordChangeInput) -> Option<PasswordRuleViolation> {
    (input.password != input.confirm_password).then_some(PasswordRuleViolation::Mismatch)
}

/// Field-level failures from [`validate_password_change`], at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordFieldErrors(BTreeMap<PasswordField, PasswordRuleViolation>);

impl PasswordFieldErrors {
    pub fn get(&self, field: PasswordField) -> Option<PasswordRuleViolation> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: PasswordField) -> Option<&'static str> {
        self.get(field).map(|v| v.message())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PasswordField, PasswordRuleViolation)> + '_ {
        self.0.iter().map(|(field, violation)| (*field, *violation))
    }
}

impl From<PasswordFieldErrors> for AppError {
    fn from(errors: PasswordFieldErrors) -> Self {
        let field_errors: HashMap<String, String> = errors
            .iter()
            .map(|(field, violation)| (field.as_str().to_string(), violation.message().to_string()))
            .collect();
        AppError::validation("Validation failed", field_errors)
    }
}

/// Input that satisfied every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPasswordChange(PasswordChangeInput);

impl ValidPasswordChange {
    pub fn password(&self) -> &str {
        &self.0.password
    }

    /// The body sent to the backend. The confirmation never leaves the client.
    pub fn into_request(self) -> ChangePasswordRequest {
        ChangePasswordRequest {
            password: self.0.password,
        }
    }
}

/// Run every rule against `input`.
pub fn validate_password_change(
    input: &PasswordChangeInput,
) -> Result<ValidPasswordChange, PasswordFieldErrors> {
    let mut errors = BTreeMap::new();
    for rule in PASSWORD_RULES {
        if errors.contains_key(&rule.field) {
            continue;
        }
        if let Some(violation) = (rule.check)(input) {
            errors.insert(rule.field, violation);
        }
    }

    if errors.is_empty() {
        Ok(ValidPasswordChange(input.clone()))
    } else {
        Err(PasswordFieldErrors(errors))
    }
}
