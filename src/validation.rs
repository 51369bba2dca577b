//! Shared input checks used by the request types' `Validate` derives.

use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

lazy_static::lazy_static! {
    /// `local@domain.tld`, no whitespace and exactly one `@` separating non-empty parts.
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Rejects empty and whitespace-only strings.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

/// Emails are compared case-insensitively, so they are stored in this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Deserializes a field that distinguishes "absent" from "explicitly null".
///
/// Use together with `#[serde(default)]` on an `Option<Option<T>>` field: a missing
/// key stays `None`, `null` becomes `Some(None)`, and a value becomes `Some(Some(v))`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
