//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use std::sync::Arc;

use crate::{repository::CatalogStore, validation::FieldError};

/// Outcome of a create/update submission
#[derive(Debug)]
pub enum Submission<T, F> {
    /// Persisted (or, for genres, an identical record already existed)
    Saved(T),
    /// Input failed validation; nothing was written
    Rejected { form: F, errors: Vec<FieldError> },
}

/// Outcome of a delete submission
#[derive(Debug)]
pub enum Removal<D> {
    Removed,
    /// Other records still reference the target; nothing was deleted
    Blocked(D),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub genres: genres::GenreService,
    pub authors: authors::AuthorService,
    pub books: books::BookService,
    pub book_instances: book_instances::BookInstanceService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            genres: genres::GenreService::new(store.clone()),
            authors: authors::AuthorService::new(store.clone()),
            books: books::BookService::new(store.clone()),
            book_instances: book_instances::BookInstanceService::new(store),
        }
    }
}

/// Convert an accepted form's candidate record, which only fails to build
/// when validation let a malformed reference through.
pub(crate) fn accepted<T>(record: Option<T>) -> crate::error::AppResult<T> {
    record.ok_or_else(|| {
        crate::error::AppError::Internal("validated form did not produce a record".to_string())
    })
}
