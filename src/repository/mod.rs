//! Repository layer for database operations

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, Book, BookDetail, BookInstance, BookInstanceDetail, BookInstanceStatus, BookTitle,
        BookWithAuthor, Genre, NewAuthor, NewBook, NewBookInstance, NewGenre,
    },
};

/// Record store used by the services.
///
/// Lookups by identifier return `Ok(None)` when nothing matches; updates
/// return `Ok(None)` when the identifier is unknown and deletes report
/// whether a record was removed. Identifiers are assigned by the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn ping(&self) -> AppResult<()>;

    // Genres
    async fn genre_list(&self) -> AppResult<Vec<Genre>>;
    async fn genre_get(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn genre_find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn genre_create(&self, data: &NewGenre) -> AppResult<Genre>;
    async fn genre_update(&self, id: Uuid, data: &NewGenre) -> AppResult<Option<Genre>>;
    async fn genre_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn genre_count(&self) -> AppResult<i64>;

    // Authors
    async fn author_list(&self) -> AppResult<Vec<Author>>;
    async fn author_get(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn author_create(&self, data: &NewAuthor) -> AppResult<Author>;
    async fn author_update(&self, id: Uuid, data: &NewAuthor) -> AppResult<Option<Author>>;
    async fn author_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn author_count(&self) -> AppResult<i64>;

    // Books
    async fn book_titles(&self) -> AppResult<Vec<BookTitle>>;
    async fn book_list(&self) -> AppResult<Vec<BookWithAuthor>>;
    async fn book_get(&self, id: Uuid) -> AppResult<Option<BookDetail>>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;
    async fn book_create(&self, data: &NewBook) -> AppResult<Book>;
    async fn book_update(&self, id: Uuid, data: &NewBook) -> AppResult<Option<Book>>;
    async fn book_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn book_count(&self) -> AppResult<i64>;

    // Book instances
    async fn book_instance_list(&self) -> AppResult<Vec<BookInstanceDetail>>;
    async fn book_instance_get(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>>;
    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn book_instance_create(&self, data: &NewBookInstance) -> AppResult<BookInstance>;
    async fn book_instance_update(
        &self,
        id: Uuid,
        data: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>>;
    async fn book_instance_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn book_instance_count(&self, status: Option<BookInstanceStatus>) -> AppResult<i64>;
}

/// PostgreSQL-backed store holding the process-wide connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// New time-ordered identifier, so identifier order follows creation order
    fn next_id() -> Uuid {
        Uuid::now_v7()
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn genre_list(&self) -> AppResult<Vec<Genre>> {
        self.genres_list().await
    }
    async fn genre_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        self.genres_get(id).await
    }
    async fn genre_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.genres_find_by_name(name).await
    }
    async fn genre_create(&self, data: &NewGenre) -> AppResult<Genre> {
        self.genres_create(data).await
    }
    async fn genre_update(&self, id: Uuid, data: &NewGenre) -> AppResult<Option<Genre>> {
        self.genres_update(id, data).await
    }
    async fn genre_delete(&self, id: Uuid) -> AppResult<bool> {
        self.genres_delete(id).await
    }
    async fn genre_count(&self) -> AppResult<i64> {
        self.genres_count().await
    }

    async fn author_list(&self) -> AppResult<Vec<Author>> {
        self.authors_list().await
    }
    async fn author_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors_get(id).await
    }
    async fn author_create(&self, data: &NewAuthor) -> AppResult<Author> {
        self.authors_create(data).await
    }
    async fn author_update(&self, id: Uuid, data: &NewAuthor) -> AppResult<Option<Author>> {
        self.authors_update(id, data).await
    }
    async fn author_delete(&self, id: Uuid) -> AppResult<bool> {
        self.authors_delete(id).await
    }
    async fn author_count(&self) -> AppResult<i64> {
        self.authors_count().await
    }

    async fn book_titles(&self) -> AppResult<Vec<BookTitle>> {
        self.books_titles().await
    }
    async fn book_list(&self) -> AppResult<Vec<BookWithAuthor>> {
        self.books_list().await
    }
    async fn book_get(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        self.books_get(id).await
    }
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        self.books_list_by_author(author_id).await
    }
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        self.books_list_by_genre(genre_id).await
    }
    async fn book_create(&self, data: &NewBook) -> AppResult<Book> {
        self.books_create(data).await
    }
    async fn book_update(&self, id: Uuid, data: &NewBook) -> AppResult<Option<Book>> {
        self.books_update(id, data).await
    }
    async fn book_delete(&self, id: Uuid) -> AppResult<bool> {
        self.books_delete(id).await
    }
    async fn book_count(&self) -> AppResult<i64> {
        self.books_count().await
    }

    async fn book_instance_list(&self) -> AppResult<Vec<BookInstanceDetail>> {
        self.book_instances_list().await
    }
    async fn book_instance_get(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        self.book_instances_get(id).await
    }
    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        self.book_instances_list_by_book(book_id).await
    }
    async fn book_instance_create(&self, data: &NewBookInstance) -> AppResult<BookInstance> {
        self.book_instances_create(data).await
    }
    async fn book_instance_update(
        &self,
        id: Uuid,
        data: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>> {
        self.book_instances_update(id, data).await
    }
    async fn book_instance_delete(&self, id: Uuid) -> AppResult<bool> {
        self.book_instances_delete(id).await
    }
    async fn book_instance_count(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        self.book_instances_count(status).await
    }
}
