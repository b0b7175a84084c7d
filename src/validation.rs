//! Form sanitization and validation helpers shared by all entity forms.
//!
//! Every form goes through the same three steps: `trim` (drop surrounding
//! whitespace and empty optional values), the field rules declared with
//! `validator` derives, checked against the trimmed input, and `escape`
//! (HTML-escape free text with `tera::escape_html`). Failures are flattened
//! into an ordered list of [`FieldError`] so the form can list them in field
//! order.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub rule: String,
    pub message: String,
}

/// Trim an optional value, mapping blank input to `None`.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse an ISO-8601 date (`YYYY-MM-DD`), also accepting an RFC 3339
/// timestamp, in which case its date part is kept.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Parse a record identifier. Blank and malformed values yield `None`.
pub fn parse_id(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value.trim()).ok()
}

/// Split multi-valued input on commas and semicolons.
///
/// Accepts several submitted values, each of which may itself hold a
/// delimited list. Blank entries are dropped and duplicates removed while
/// keeping first-seen order.
pub fn split_list<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        for part in value.as_ref().split([',', ';']) {
            let part = part.trim();
            if !part.is_empty() && !out.iter().any(|p| p == part) {
                out.push(part.to_string());
            }
        }
    }
    out
}

/// Flatten `validator` errors into a list ordered by `field_order`, then by
/// rule declaration order within a field.
pub fn ordered_errors(errors: &ValidationErrors, field_order: &[&str]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut out = Vec::new();

    for field in field_order {
        if let Some(list) = by_field.get(*field) {
            for error in list.iter() {
                out.push(FieldError {
                    field: field.to_string(),
                    rule: error.code.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field)),
                });
            }
        }
    }

    out
}

/// Run derived validation rules and return the ordered failure list.
pub fn check<T: validator::Validate>(form: &T, field_order: &[&str]) -> Vec<FieldError> {
    match form.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => ordered_errors(&errors, field_order),
    }
}

// ---------------------------------------------------------------------------
// Custom rules
// ---------------------------------------------------------------------------

/// Non-empty values must be well-formed identifiers; emptiness is reported by
/// the `length` rule.
pub fn validate_reference(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_id(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("reference"))
    }
}

pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    match parse_iso_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("iso8601")),
    }
}

pub fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(char::is_alphanumeric) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

pub fn validate_references(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|v| parse_id(v).is_some()) {
        Ok(())
    } else {
        Err(ValidationError::new("reference"))
    }
}
