//! Author service

use std::sync::Arc;

use uuid::Uuid;

use super::{Removal, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, Book},
    repository::CatalogStore,
};

pub const NOT_FOUND: &str = "Author not found";

#[derive(Clone)]
pub struct AuthorService {
    store: Arc<dyn CatalogStore>,
}

impl AuthorService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.store.author_list().await
    }

    /// Author and their books, fetched concurrently
    pub async fn get(&self, id: Uuid) -> AppResult<(Author, Vec<Book>)> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    pub async fn find(&self, id: Uuid) -> AppResult<Option<(Author, Vec<Book>)>> {
        let (author, books) =
            tokio::try_join!(self.store.author_get(id), self.store.books_by_author(id))?;
        Ok(author.map(|author| (author, books)))
    }

    pub async fn edit(&self, id: Uuid) -> AppResult<Author> {
        self.store
            .author_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<Submission<Author, AuthorForm>> {
        let form = form.trim();
        let errors = form.errors();
        let form = form.escape();
        if !errors.is_empty() {
            return Ok(Submission::Rejected { form, errors });
        }

        let created = self.store.author_create(&form.to_record()).await?;
        tracing::info!("Created author {}", created.id);
        Ok(Submission::Saved(created))
    }

    pub async fn update(&self, id: Uuid, form: AuthorForm) -> AppResult<Submission<Author, AuthorForm>> {
        let form = form.trim();
        let errors = form.errors();
        let form = form.escape();
        if !errors.is_empty() {
            return Ok(Submission::Rejected { form, errors });
        }

        let updated = self
            .store
            .author_update(id, &form.to_record())
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        tracing::info!("Updated author {}", id);
        Ok(Submission::Saved(updated))
    }

    /// Delete the author unless books still reference them
    pub async fn delete(&self, id: Uuid) -> AppResult<Removal<(Author, Vec<Book>)>> {
        match self.find(id).await? {
            Some((author, books)) if !books.is_empty() => {
                tracing::warn!("Author {} still has {} book(s); not deleted", id, books.len());
                Ok(Removal::Blocked((author, books)))
            }
            _ => {
                if self.store.author_delete(id).await? {
                    tracing::info!("Deleted author {}", id);
                }
                Ok(Removal::Removed)
            }
        }
    }
}
