//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorForm, NewAuthor};
pub use book::{Book, BookDetail, BookForm, BookTitle, BookWithAuthor, NewBook};
pub use book_instance::{
    BookInstance, BookInstanceDetail, BookInstanceForm, BookInstanceStatus, NewBookInstance,
};
pub use genre::{Genre, GenreForm, NewGenre};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub books: i64,
    pub book_instances: i64,
    pub book_instances_available: i64,
    pub authors: i64,
    pub genres: i64,
}

/// Which rule set a submitted form is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}
