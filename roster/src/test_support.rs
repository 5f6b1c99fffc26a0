//! Test-only helpers for constructing registry inputs and records.

use chrono::NaiveDate;

use crate::core::types::{Gender, UserRecord, UserRecordInput};
use crate::forms::RegisterForm;

/// Calendar date from parts. Panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Create a deterministic input with the given email and country.
pub fn input(email: &str, country: &str) -> UserRecordInput {
    UserRecordInput {
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        address: "1 Main Street".to_string(),
        country: country.to_string(),
        gender: Gender::Other,
        phone_number: "0123456789".to_string(),
        password: "password1".to_string(),
    }
}

/// Create a deterministic input with explicit credentials.
pub fn input_with_password(email: &str, password: &str) -> UserRecordInput {
    UserRecordInput {
        password: password.to_string(),
        ..input(email, "USA")
    }
}

/// Create a stored record directly (bypassing the store) for filter tests.
pub fn record(email: &str, country: &str, gender: Gender, registration_date: &str) -> UserRecord {
    let input = UserRecordInput {
        gender,
        ..input(email, country)
    };
    UserRecord::from_input(input, registration_date.to_string())
}

/// A register form that passes every validation rule.
pub fn register_form(email: &str, password: &str) -> RegisterForm {
    RegisterForm {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        address: "12 St James's Square".to_string(),
        country: "UK".to_string(),
        gender: "female".to_string(),
        phone_number: "0123456789".to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
    }
}
