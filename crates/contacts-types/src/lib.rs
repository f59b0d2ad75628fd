//! Shared types for the contacts service.
//!
//! The wire shapes here are used by both `contacts-server` (which produces
//! them) and `contacts-client` (which consumes them), so a field rename in
//! one place cannot silently desynchronise the two.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Error text returned when a create request lacks a name, email, or phone.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, Email, and Phone are required.";

/// Error text for an email that does not look like `x@y.z`.
pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email";

/// A persisted contact as returned by the API.
///
/// `id` and `created_at` are always server-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A candidate contact submitted for creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Non-whitespace, `@`, non-whitespace, `.`, non-whitespace, anywhere in the input.
static LOOSE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid loose email regex"));

/// Loose `x@y.z` shape check.
///
/// This is a typo guard, not RFC 5322 validation: the match is unanchored,
/// so a valid-looking run anywhere in `s` is enough.
pub fn is_loose_email(s: &str) -> bool {
    LOOSE_EMAIL.is_match(s)
}
