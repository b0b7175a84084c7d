//! Book instance (physical copy) model and form

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{book::Book, FormMode};
use crate::validation::{self, FieldError};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Available,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown book instance status: {0}")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for BookInstanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for BookInstanceStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    #[sqlx(try_from = "String")]
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    /// Due date as "March 5th, 2024"; empty when unset.
    pub fn due_back_formatted(&self) -> String {
        self.due_back.map(format_long_date).unwrap_or_default()
    }
}

/// Book instance with its book populated; `book` is `None` when the
/// reference dangles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceDetail {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookInstance {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

/// Book instance create/update form, as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Book must be specified"),
        custom(function = "validation::validate_reference", message = "Invalid book")
    )]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[serde(default)]
    #[validate(custom(function = "validation::validate_iso_date", message = "Invalid date"))]
    pub due_back: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_status", message = "Invalid status"))]
    pub status: Option<String>,
}

/// Update requires every field to be present.
#[derive(Debug, Validate)]
struct RequiredFields {
    #[validate(length(min = 1, message = "Due date must be specified"))]
    due_back: String,
    #[validate(length(min = 1, message = "Status must be specified"))]
    status: String,
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<BookInstanceStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("status"))
}

impl BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "due_back", "status"];

    pub fn trim(self) -> Self {
        Self {
            book: self.book.trim().to_string(),
            imprint: self.imprint.trim().to_string(),
            due_back: validation::trim_optional(self.due_back.as_deref()),
            status: validation::trim_optional(self.status.as_deref()),
        }
    }

    /// Escape free text; `status` only ever holds one of the fixed names
    pub fn escape(self) -> Self {
        Self {
            book: tera::escape_html(&self.book),
            imprint: tera::escape_html(&self.imprint),
            ..self
        }
    }

    /// Field errors for the given mode, ordered book, imprint, due_back, status.
    pub fn errors(&self, mode: FormMode) -> Vec<FieldError> {
        let mut errors = validation::check(self, Self::FIELDS);

        if mode == FormMode::Update {
            let required = RequiredFields {
                due_back: self.due_back.clone().unwrap_or_default(),
                status: self.status.clone().unwrap_or_default(),
            };
            errors.extend(validation::check(&required, Self::FIELDS));
            errors.sort_by_key(|e| Self::FIELDS.iter().position(|f| *f == e.field));
        }

        errors
    }

    /// Candidate record; `None` when the book reference does not parse.
    pub fn to_record(&self) -> Option<NewBookInstance> {
        Some(NewBookInstance {
            book_id: validation::parse_id(&self.book)?,
            imprint: self.imprint.clone(),
            status: self
                .status
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            due_back: self.due_back.as_deref().and_then(validation::parse_iso_date),
        })
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            due_back: instance.due_back.map(|d| d.format("%Y-%m-%d").to_string()),
            status: Some(instance.status.to_string()),
        }
    }
}

fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{} {}{}, {}", date.format("%B"), day, suffix, date.year())
}
