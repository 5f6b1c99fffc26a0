//! Field-level validation of the register and login forms.
//!
//! This is the upstream collaborator of the registry core: outer surfaces
//! validate raw form input here and only hand well-formed values to
//! [`crate::app::AppState::dispatch`]. All failing fields are reported, not
//! just the first one.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::types::{Gender, UserRecordInput};

/// Minimum password length in UTF-16 code units, as the browser form counts it.
pub const MIN_PASSWORD_LEN: usize = 8;

const REQUIRED: &str = "Required";
const INVALID_EMAIL: &str = "Invalid email address";
const INVALID_PHONE: &str = "Must be a valid phone number";
const SHORT_PASSWORD: &str = "Password must be at least 8 characters";
const PASSWORD_MISMATCH: &str = "Passwords must match";
const INVALID_GENDER: &str = "Must be one of male, female, other";

/// Approximates the browser-side `email()` rule: one `@`, no whitespace, and a
/// dot in the domain. Dotless domains such as `user@localhost` are rejected.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Raw registration form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub country: String,
    pub gender: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

/// Raw login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message for `field`, if it failed.
    pub fn message(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FormErrors {}

impl RegisterForm {
    pub fn validate(self) -> Result<UserRecordInput, FormErrors> {
        let mut errors = FormErrors::default();

        required(&mut errors, "firstName", &self.first_name);
        required(&mut errors, "lastName", &self.last_name);
        email(&mut errors, "email", &self.email);
        required(&mut errors, "address", &self.address);
        required(&mut errors, "country", &self.country);

        let gender = if self.gender.is_empty() {
            errors.push("gender", REQUIRED);
            None
        } else {
            let parsed = Gender::parse(&self.gender);
            if parsed.is_none() {
                errors.push("gender", INVALID_GENDER);
            }
            parsed
        };

        if self.phone_number.is_empty() {
            errors.push("phoneNumber", REQUIRED);
        } else if !PHONE_RE.is_match(&self.phone_number) {
            errors.push("phoneNumber", INVALID_PHONE);
        }

        if self.password.is_empty() {
            errors.push("password", REQUIRED);
        } else if self.password.encode_utf16().count() < MIN_PASSWORD_LEN {
            errors.push("password", SHORT_PASSWORD);
        }

        if self.confirm_password.is_empty() {
            errors.push("confirmPassword", REQUIRED);
        } else if self.confirm_password != self.password {
            errors.push("confirmPassword", PASSWORD_MISMATCH);
        }

        match gender {
            Some(gender) if errors.is_empty() => Ok(UserRecordInput {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                address: self.address,
                country: self.country,
                gender,
                phone_number: self.phone_number,
                password: self.password,
            }),
            _ => Err(errors),
        }
    }
}

impl LoginForm {
    /// Returns `(email, password)` when both are present and the email is well formed.
    pub fn validate(self) -> Result<(String, String), FormErrors> {
        let mut errors = FormErrors::default();
        email(&mut errors, "email", &self.email);
        required(&mut errors, "password", &self.password);
        if errors.is_empty() {
            Ok((self.email, self.password))
        } else {
            Err(errors)
        }
    }
}

/// Only the empty string is missing; whitespace counts as a value.
fn required(errors: &mut FormErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(field, REQUIRED);
    }
}

fn email(errors: &mut FormErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(field, REQUIRED);
    } else if !EMAIL_RE.is_match(value) {
        errors.push(field, INVALID_EMAIL);
    }
}
