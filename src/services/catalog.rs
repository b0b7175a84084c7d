//! Catalog home service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{BookInstanceStatus, CatalogCounts},
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Record counts, fetched concurrently
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, book_instances, book_instances_available, authors, genres) = tokio::try_join!(
            self.store.book_count(),
            self.store.book_instance_count(None),
            self.store.book_instance_count(Some(BookInstanceStatus::Available)),
            self.store.author_count(),
            self.store.genre_count(),
        )?;

        Ok(CatalogCounts {
            books,
            book_instances,
            book_instances_available,
            authors,
            genres,
        })
    }

    /// Store connectivity check
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
