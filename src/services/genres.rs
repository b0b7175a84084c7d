//! Genre service

use std::sync::Arc;

use uuid::Uuid;

use super::{Removal, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, GenreForm},
    repository::CatalogStore,
};

pub const NOT_FOUND: &str = "Genre not found";

#[derive(Clone)]
pub struct GenreService {
    store: Arc<dyn CatalogStore>,
}

impl GenreService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.store.genre_list().await
    }

    /// Genre and the books filed under it, fetched concurrently
    pub async fn get(&self, id: Uuid) -> AppResult<(Genre, Vec<Book>)> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    pub async fn find(&self, id: Uuid) -> AppResult<Option<(Genre, Vec<Book>)>> {
        let (genre, books) =
            tokio::try_join!(self.store.genre_get(id), self.store.books_by_genre(id))?;
        Ok(genre.map(|genre| (genre, books)))
    }

    pub async fn edit(&self, id: Uuid) -> AppResult<Genre> {
        self.store
            .genre_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Create a genre, or return the existing genre with the same name
    pub async fn create(&self, form: GenreForm) -> AppResult<Submission<Genre, GenreForm>> {
        let form = form.trim();
        let errors = form.errors();
        let form = form.escape();
        if !errors.is_empty() {
            return Ok(Submission::Rejected { form, errors });
        }

        if let Some(existing) = self.store.genre_find_by_name(&form.name).await? {
            tracing::info!("Genre {:?} already exists as {}", form.name, existing.id);
            return Ok(Submission::Saved(existing));
        }

        let created = self.store.genre_create(&form.to_record()).await?;
        tracing::info!("Created genre {}", created.id);
        Ok(Submission::Saved(created))
    }

    pub async fn update(&self, id: Uuid, form: GenreForm) -> AppResult<Submission<Genre, GenreForm>> {
        let form = form.trim();
        let errors = form.errors();
        let form = form.escape();
        if !errors.is_empty() {
            return Ok(Submission::Rejected { form, errors });
        }

        let updated = self
            .store
            .genre_update(id, &form.to_record())
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        tracing::info!("Updated genre {}", id);
        Ok(Submission::Saved(updated))
    }

    /// Delete the genre unless books are still filed under it
    pub async fn delete(&self, id: Uuid) -> AppResult<Removal<(Genre, Vec<Book>)>> {
        match self.find(id).await? {
            Some((genre, books)) if !books.is_empty() => {
                tracing::warn!("Genre {} still has {} book(s); not deleted", id, books.len());
                Ok(Removal::Blocked((genre, books)))
            }
            _ => {
                if self.store.genre_delete(id).await? {
                    tracing::info!("Deleted genre {}", id);
                }
                Ok(Removal::Removed)
            }
        }
    }
}
