//! Book service

use std::sync::Arc;

use uuid::Uuid;

use super::{accepted, Removal, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookDetail, BookForm, BookInstance, BookWithAuthor, Genre},
    repository::CatalogStore,
};

pub const NOT_FOUND: &str = "Book not found";

#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn CatalogStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All books with their author, sorted by title
    pub async fn list(&self) -> AppResult<Vec<BookWithAuthor>> {
        self.store.book_list().await
    }

    /// Book (author and genres populated) and its copies, fetched concurrently
    pub async fn get(&self, id: Uuid) -> AppResult<(BookDetail, Vec<BookInstance>)> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    pub async fn find(&self, id: Uuid) -> AppResult<Option<(BookDetail, Vec<BookInstance>)>> {
        let (book, instances) =
            tokio::try_join!(self.store.book_get(id), self.store.book_instances_by_book(id))?;
        Ok(book.map(|book| (book, instances)))
    }

    /// Authors and genres offered by the form's selectors
    pub async fn choices(&self) -> AppResult<(Vec<Author>, Vec<Genre>)> {
        tokio::try_join!(self.store.author_list(), self.store.genre_list())
    }

    /// Book to edit plus the selector choices, fetched concurrently
    pub async fn edit(&self, id: Uuid) -> AppResult<(BookDetail, Vec<Author>, Vec<Genre>)> {
        let (book, authors, genres) = tokio::try_join!(
            self.store.book_get(id),
            self.store.author_list(),
            self.store.genre_list(),
        )?;
        let book = book.ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        Ok((book, authors, genres))
    }

    pub async fn create(&self, form: BookForm) -> AppResult<Submission<Book, BookForm>> {
        let form = form.trim();
        let errors = form.errors();
        let form = form.escape();
        if !errors.is_empty() {
            return Ok(Submission::Rejected { form, errors });
        }

        let record = accepted(form.to_record())?;
        let created = self.store.book_create(&record).await?;
        tracing::info!("Created book {}", created.id);
        Ok(Submission::Saved(created))
    }

    pub async fn update(&self, id: Uuid, form: BookForm) -> AppResult<Submission<Book, BookForm>> {
        let form = form.trim();
        let errors = form.errors();
        let form = form.escape();
        if !errors.is_empty() {
            return Ok(Submission::Rejected { form, errors });
        }

        let record = accepted(form.to_record())?;
        let updated = self
            .store
            .book_update(id, &record)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        tracing::info!("Updated book {}", id);
        Ok(Submission::Saved(updated))
    }

    /// Delete the book unless copies of it still exist
    pub async fn delete(&self, id: Uuid) -> AppResult<Removal<(BookDetail, Vec<BookInstance>)>> {
        match self.find(id).await? {
            Some((book, instances)) if !instances.is_empty() => {
                tracing::warn!("Book {} still has {} copies; not deleted", id, instances.len());
                Ok(Removal::Blocked((book, instances)))
            }
            _ => {
                if self.store.book_delete(id).await? {
                    tracing::info!("Deleted book {}", id);
                }
                Ok(Removal::Removed)
            }
        }
    }
}
