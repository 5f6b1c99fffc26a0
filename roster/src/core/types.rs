//! Shared deterministic types for the registry core.
//!
//! These types define stable contracts between core components and the outer
//! surfaces (CLI script runner, HTTP server). They carry no I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable handle to a stored record: its insertion index in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Lowercase wire name, also used for filter equality.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Gender> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied fields of a new registration.
///
/// Syntactic rules (email shape, 10-digit phone, password length) are checked
/// upstream by [`crate::forms`]; the store accepts whatever it is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecordInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub country: String,
    pub gender: Gender,
    pub phone_number: String,
    pub password: String,
}

/// A stored user. `registration_date` is stamped by the store at append time.
///
/// The password is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub country: String,
    pub gender: Gender,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// `YYYY-MM-DD`, set once at creation.
    pub registration_date: String,
}

impl UserRecord {
    pub(crate) fn from_input(input: UserRecordInput, registration_date: String) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            address: input.address,
            country: input.country,
            gender: input.gender,
            phone_number: input.phone_number,
            password: input.password,
            registration_date,
        }
    }

    /// Header line shown to the authenticated user.
    pub fn greeting(&self) -> String {
        format!("Welcome, {} ({})", self.first_name, self.email)
    }
}

/// Optional equality constraints over the store.
///
/// A field that is `None` or `Some("")` imposes no constraint, matching the
/// "All" choice of the filter form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub date: Option<String>,
    pub country: Option<String>,
    pub gender: Option<String>,
}

impl FilterSpec {
    pub fn date(&self) -> Option<&str> {
        populated(&self.date)
    }

    pub fn country(&self) -> Option<&str> {
        populated(&self.country)
    }

    pub fn gender(&self) -> Option<&str> {
        populated(&self.gender)
    }
}

fn populated(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
