//! Genre model and form

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{self, FieldError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Candidate genre built from an accepted form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: String,
}

/// Genre create/update form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(
        min = 3,
        max = 100,
        message = "Genre name must be between 3 and 100 characters"
    ))]
    pub name: String,
}

impl GenreForm {
    const FIELDS: &'static [&'static str] = &["name"];

    pub fn trim(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }

    /// Escape markup; rules are checked on the trimmed input before this
    pub fn escape(self) -> Self {
        Self {
            name: tera::escape_html(&self.name),
        }
    }

    pub fn errors(&self) -> Vec<FieldError> {
        validation::check(self, Self::FIELDS)
    }

    pub fn to_record(&self) -> NewGenre {
        NewGenre {
            name: self.name.clone(),
        }
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}
