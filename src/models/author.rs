//! Author model and form

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{self, FieldError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "Family, First"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Birth and death years, e.g. "1920 - 1992"; an unknown side stays empty.
    pub fn lifespan(&self) -> String {
        let year = |d: Option<NaiveDate>| d.map(|d| d.year().to_string()).unwrap_or_default();
        format!("{} - {}", year(self.date_of_birth), year(self.date_of_death))
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Author create/update form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(
            function = "validation::validate_alphanumeric",
            message = "First name has non-alphanumeric characters."
        )
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        custom(
            function = "validation::validate_alphanumeric",
            message = "Family name has non-alphanumeric characters."
        )
    )]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(
        function = "validation::validate_iso_date",
        message = "Invalid date of birth"
    ))]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    #[validate(custom(
        function = "validation::validate_iso_date",
        message = "Invalid date of death"
    ))]
    pub date_of_death: Option<String>,
}

impl AuthorForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    pub fn trim(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            family_name: self.family_name.trim().to_string(),
            date_of_birth: validation::trim_optional(self.date_of_birth.as_deref()),
            date_of_death: validation::trim_optional(self.date_of_death.as_deref()),
        }
    }

    pub fn escape(self) -> Self {
        Self {
            first_name: tera::escape_html(&self.first_name),
            family_name: tera::escape_html(&self.family_name),
            ..self
        }
    }

    pub fn errors(&self) -> Vec<FieldError> {
        validation::check(self, Self::FIELDS)
    }

    pub fn to_record(&self) -> NewAuthor {
        NewAuthor {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: self.date_of_birth.as_deref().and_then(validation::parse_iso_date),
            date_of_death: self.date_of_death.as_deref().and_then(validation::parse_iso_date),
        }
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()),
            date_of_death: author.date_of_death.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}
