//! Book model and form

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{author::Author, genre::Genre};
use crate::validation::{self, FieldError};

/// Book record. `genre_ids` keeps the order in which genres were submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Identifier + title projection used by selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookTitle {
    pub id: Uuid,
    pub title: String,
}

impl BookTitle {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Book with its author populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookWithAuthor {
    pub book: Book,
    pub author: Option<Author>,
}

/// Book with author and genres populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}

/// Book create/update form.
///
/// `genre` collects every submitted value; each may hold a comma or
/// semicolon separated list of genre identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Author must not be empty."),
        custom(function = "validation::validate_reference", message = "Invalid author")
    )]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    #[serde(default)]
    #[validate(custom(function = "validation::validate_references", message = "Invalid genre"))]
    pub genre: Vec<String>,
}

impl BookForm {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn", "genre"];

    /// Trim text fields and flatten the genre input into single identifiers
    pub fn trim(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            summary: self.summary.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            genre: validation::split_list(&self.genre),
        }
    }

    pub fn escape(self) -> Self {
        Self {
            title: tera::escape_html(&self.title),
            author: tera::escape_html(&self.author),
            summary: tera::escape_html(&self.summary),
            isbn: tera::escape_html(&self.isbn),
            genre: self.genre.iter().map(|g| tera::escape_html(g)).collect(),
        }
    }

    pub fn errors(&self) -> Vec<FieldError> {
        validation::check(self, Self::FIELDS)
    }

    /// Candidate record; `None` when a reference does not parse.
    pub fn to_record(&self) -> Option<NewBook> {
        let genre_ids = self
            .genre
            .iter()
            .map(|g| validation::parse_id(g))
            .collect::<Option<Vec<_>>>()?;

        Some(NewBook {
            title: self.title.clone(),
            author_id: validation::parse_id(&self.author)?,
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genre_ids,
        })
    }

    pub fn has_genre(&self, id: Uuid) -> bool {
        self.genre.iter().any(|g| validation::parse_id(g) == Some(id))
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author_id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre_ids.iter().map(Uuid::to_string).collect(),
        }
    }
}
