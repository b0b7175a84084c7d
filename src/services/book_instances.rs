//! Book instance (copy) service

use std::sync::Arc;

use uuid::Uuid;

use super::{accepted, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{BookInstance, BookInstanceDetail, BookInstanceForm, BookTitle, FormMode},
    repository::CatalogStore,
};

pub const NOT_FOUND: &str = "Book instance not found";

#[derive(Clone)]
pub struct BookInstanceService {
    store: Arc<dyn CatalogStore>,
}

impl BookInstanceService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All copies with their book, in identifier order
    pub async fn list(&self) -> AppResult<Vec<BookInstanceDetail>> {
        self.store.book_instance_list().await
    }

    /// Copy with its book, or NotFound
    pub async fn get(&self, id: Uuid) -> AppResult<BookInstanceDetail> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    pub async fn find(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        self.store.book_instance_get(id).await
    }

    /// Books offered by the form's selector, sorted by title
    pub async fn book_choices(&self) -> AppResult<Vec<BookTitle>> {
        self.store.book_titles().await
    }

    /// Copy to edit plus the selector choices, fetched concurrently
    pub async fn edit(&self, id: Uuid) -> AppResult<(BookInstanceDetail, Vec<BookTitle>)> {
        let (instance, books) =
            tokio::try_join!(self.store.book_instance_get(id), self.store.book_titles())?;
        let instance = instance.ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        Ok((instance, books))
    }

    pub async fn create(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<Submission<BookInstance, BookInstanceForm>> {
        let form = form.trim();
        let errors = form.errors(FormMode::Create);
        let form = form.escape();
        if !errors.is_empty() {
            return Ok(Submission::Rejected { form, errors });
        }

        let record = accepted(form.to_record())?;
        let created = self.store.book_instance_create(&record).await?;
        tracing::info!("Created book instance {}", created.id);
        Ok(Submission::Saved(created))
    }

    /// Replace the copy at `id`, keeping its identifier
    pub async fn update(
        &self,
        id: Uuid,
        form: BookInstanceForm,
    ) -> AppResult<Submission<BookInstance, BookInstanceForm>> {
        let form = form.trim();
        let errors = form.errors(FormMode::Update);
        let form = form.escape();
        if !errors.is_empty() {
            return Ok(Submission::Rejected { form, errors });
        }

        let record = accepted(form.to_record())?;
        let updated = self
            .store
            .book_instance_update(id, &record)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
        tracing::info!("Updated book instance {}", id);
        Ok(Submission::Saved(updated))
    }

    /// Delete the copy; deleting a missing copy is not an error
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.store.book_instance_delete(id).await? {
            tracing::info!("Deleted book instance {}", id);
        }
        Ok(())
    }
}
