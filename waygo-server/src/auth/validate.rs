//! Login and registration form validation.
//!
//! Every failing field is reported, one message per field.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum password length accepted at login.
const LOGIN_MIN_PASSWORD: usize = 4;

/// Minimum username length for new accounts.
const REGISTER_MIN_USERNAME: usize = 3;

/// Minimum password length for new accounts.
const REGISTER_MIN_PASSWORD: usize = 6;

/// Username and password as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// New account form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// One invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// All invalid fields of a form, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Message for `field`, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.0.iter().map(|e| e.message).collect();
        write!(f, "invalid input: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a login attempt.
pub fn validate_login(credentials: &Credentials) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if credentials.username.trim().is_empty() {
        errors.push("username", "Username is required");
    }

    if credentials.password.is_empty() {
        errors.push("password", "Password is required");
    } else if credentials.password.chars().count() < LOGIN_MIN_PASSWORD {
        errors.push("password", "Password is too short");
    }

    errors.into_result()
}

/// Validate a registration form.
pub fn validate_registration(form: &RegisterForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let username = form.username.trim();
    if username.is_empty() {
        errors.push("username", "Username is required");
    } else if username.chars().count() < REGISTER_MIN_USERNAME {
        errors.push("username", "Min 3 characters");
    }

    if form.password.is_empty() {
        errors.push("password", "Password is required");
    } else if form.password.chars().count() < REGISTER_MIN_PASSWORD {
        errors.push("password", "Password must be at least 6 characters");
    }

    if form.confirm_password.is_empty() {
        errors.push("confirmPassword", "Please confirm your password");
    } else if form.confirm_password != form.password {
        errors.push("confirmPassword", "Passwords must match");
    }

    errors.into_result()
}
