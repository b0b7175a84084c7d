//! In-memory record store and request helpers

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use tokio::sync::RwLock;
use tower::ServiceExt;
use uuid::Uuid;

use catalog_server::{
    create_router,
    models::{
        Author, Book, BookDetail, BookInstance, BookInstanceDetail, BookInstanceStatus, BookTitle,
        BookWithAuthor, Genre, NewAuthor, NewBook, NewBookInstance, NewGenre,
    },
    repository::CatalogStore,
    AppConfig, AppError, AppResult, AppState,
};

#[derive(Default)]
struct Tables {
    genres: Vec<Genre>,
    authors: Vec<Author>,
    books: Vec<Book>,
    book_instances: Vec<BookInstance>,
}

/// Store keeping records in insertion order, which is also identifier order
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Make every following call fail like a lost database connection
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    pub async fn book_instance(&self, id: Uuid) -> Option<BookInstance> {
        let tables = self.tables.read().await;
        tables.book_instances.iter().find(|i| i.id == id).cloned()
    }

    pub async fn book_instance_total(&self) -> usize {
        self.tables.read().await.book_instances.len()
    }

    pub async fn genre_total(&self) -> usize {
        self.tables.read().await.genres.len()
    }

    pub async fn book(&self, id: Uuid) -> Option<Book> {
        let tables = self.tables.read().await;
        tables.books.iter().find(|b| b.id == id).cloned()
    }
}

fn replace<T: Clone>(rows: &mut [T], matches: impl Fn(&T) -> bool, row: T) -> Option<T> {
    let slot = rows.iter_mut().find(|r| matches(r))?;
    *slot = row.clone();
    Some(row)
}

fn remove<T>(rows: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|r| !matches(r));
    rows.len() != before
}

fn detail(tables: &Tables, book: &Book) -> BookDetail {
    BookDetail {
        book: book.clone(),
        author: tables.authors.iter().find(|a| a.id == book.author_id).cloned(),
        genres: tables
            .genres
            .iter()
            .filter(|g| book.genre_ids.contains(&g.id))
            .cloned()
            .collect(),
    }
}

fn populated(tables: &Tables, instance: &BookInstance) -> BookInstanceDetail {
    BookInstanceDetail {
        instance: instance.clone(),
        book: tables.books.iter().find(|b| b.id == instance.book_id).cloned(),
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        self.check()
    }

    async fn genre_list(&self) -> AppResult<Vec<Genre>> {
        self.check()?;
        let mut genres = self.tables.read().await.genres.clone();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn genre_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        self.check()?;
        Ok(self.tables.read().await.genres.iter().find(|g| g.id == id).cloned())
    }

    async fn genre_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.check()?;
        Ok(self.tables.read().await.genres.iter().find(|g| g.name == name).cloned())
    }

    async fn genre_create(&self, data: &NewGenre) -> AppResult<Genre> {
        self.check()?;
        let genre = Genre {
            id: Uuid::now_v7(),
            name: data.name.clone(),
        };
        self.tables.write().await.genres.push(genre.clone());
        Ok(genre)
    }

    async fn genre_update(&self, id: Uuid, data: &NewGenre) -> AppResult<Option<Genre>> {
        self.check()?;
        let genre = Genre {
            id,
            name: data.name.clone(),
        };
        Ok(replace(&mut self.tables.write().await.genres, |g| g.id == id, genre))
    }

    async fn genre_delete(&self, id: Uuid) -> AppResult<bool> {
        self.check()?;
        Ok(remove(&mut self.tables.write().await.genres, |g| g.id == id))
    }

    async fn genre_count(&self) -> AppResult<i64> {
        self.check()?;
        Ok(self.tables.read().await.genres.len() as i64)
    }

    async fn author_list(&self) -> AppResult<Vec<Author>> {
        self.check()?;
        let mut authors = self.tables.read().await.authors.clone();
        authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
        Ok(authors)
    }

    async fn author_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.check()?;
        Ok(self.tables.read().await.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn author_create(&self, data: &NewAuthor) -> AppResult<Author> {
        self.check()?;
        let author = Author {
            id: Uuid::now_v7(),
            first_name: data.first_name.clone(),
            family_name: data.family_name.clone(),
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        };
        self.tables.write().await.authors.push(author.clone());
        Ok(author)
    }

    async fn author_update(&self, id: Uuid, data: &NewAuthor) -> AppResult<Option<Author>> {
        self.check()?;
        let author = Author {
            id,
            first_name: data.first_name.clone(),
            family_name: data.family_name.clone(),
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        };
        Ok(replace(&mut self.tables.write().await.authors, |a| a.id == id, author))
    }

    async fn author_delete(&self, id: Uuid) -> AppResult<bool> {
        self.check()?;
        Ok(remove(&mut self.tables.write().await.authors, |a| a.id == id))
    }

    async fn author_count(&self) -> AppResult<i64> {
        self.check()?;
        Ok(self.tables.read().await.authors.len() as i64)
    }

    async fn book_titles(&self) -> AppResult<Vec<BookTitle>> {
        self.check()?;
        let mut titles: Vec<BookTitle> = self
            .tables
            .read()
            .await
            .books
            .iter()
            .map(|b| BookTitle {
                id: b.id,
                title: b.title.clone(),
            })
            .collect();
        titles.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(titles)
    }

    async fn book_list(&self) -> AppResult<Vec<BookWithAuthor>> {
        self.check()?;
        let tables = self.tables.read().await;
        let mut books: Vec<BookWithAuthor> = tables
            .books
            .iter()
            .map(|b| BookWithAuthor {
                book: b.clone(),
                author: tables.authors.iter().find(|a| a.id == b.author_id).cloned(),
            })
            .collect();
        books.sort_by(|a, b| a.book.title.cmp(&b.book.title));
        Ok(books)
    }

    async fn book_get(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .books
            .iter()
            .find(|b| b.id == id)
            .map(|b| detail(&tables, b)))
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .books
            .iter()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .books
            .iter()
            .filter(|b| b.genre_ids.contains(&genre_id))
            .cloned()
            .collect())
    }

    async fn book_create(&self, data: &NewBook) -> AppResult<Book> {
        self.check()?;
        let book = Book {
            id: Uuid::now_v7(),
            title: data.title.clone(),
            author_id: data.author_id,
            summary: data.summary.clone(),
            isbn: data.isbn.clone(),
            genre_ids: data.genre_ids.clone(),
        };
        self.tables.write().await.books.push(book.clone());
        Ok(book)
    }

    async fn book_update(&self, id: Uuid, data: &NewBook) -> AppResult<Option<Book>> {
        self.check()?;
        let book = Book {
            id,
            title: data.title.clone(),
            author_id: data.author_id,
            summary: data.summary.clone(),
            isbn: data.isbn.clone(),
            genre_ids: data.genre_ids.clone(),
        };
        Ok(replace(&mut self.tables.write().await.books, |b| b.id == id, book))
    }

    async fn book_delete(&self, id: Uuid) -> AppResult<bool> {
        self.check()?;
        Ok(remove(&mut self.tables.write().await.books, |b| b.id == id))
    }

    async fn book_count(&self) -> AppResult<i64> {
        self.check()?;
        Ok(self.tables.read().await.books.len() as i64)
    }

    async fn book_instance_list(&self) -> AppResult<Vec<BookInstanceDetail>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .book_instances
            .iter()
            .map(|i| populated(&tables, i))
            .collect())
    }

    async fn book_instance_get(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .book_instances
            .iter()
            .find(|i| i.id == id)
            .map(|i| populated(&tables, i)))
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .book_instances
            .iter()
            .filter(|i| i.book_id == book_id)
            .cloned()
            .collect())
    }

    async fn book_instance_create(&self, data: &NewBookInstance) -> AppResult<BookInstance> {
        self.check()?;
        let instance = BookInstance {
            id: Uuid::now_v7(),
            book_id: data.book_id,
            imprint: data.imprint.clone(),
            status: data.status,
            due_back: data.due_back,
        };
        self.tables.write().await.book_instances.push(instance.clone());
        Ok(instance)
    }

    async fn book_instance_update(
        &self,
        id: Uuid,
        data: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>> {
        self.check()?;
        let instance = BookInstance {
            id,
            book_id: data.book_id,
            imprint: data.imprint.clone(),
            status: data.status,
            due_back: data.due_back,
        };
        Ok(replace(
            &mut self.tables.write().await.book_instances,
            |i| i.id == id,
            instance,
        ))
    }

    async fn book_instance_delete(&self, id: Uuid) -> AppResult<bool> {
        self.check()?;
        Ok(remove(&mut self.tables.write().await.book_instances, |i| i.id == id))
    }

    async fn book_instance_count(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .book_instances
            .iter()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .count() as i64)
    }
}

/// Router over a fresh in-memory store
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub location: Option<String>,
    pub body: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::default());
        let state = AppState::new(config, store.clone()).expect("templates compile");
        Self {
            store,
            router: create_router(state),
        }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().expect("ascii location").to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            location,
            body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).expect("valid request");
        self.send(request).await
    }

    /// POST an urlencoded form built from `fields`, in order
    pub async fn post(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("valid request");
        self.send(request).await
    }

    pub async fn seed_author(&self, first_name: &str, family_name: &str) -> Author {
        self.store
            .author_create(&NewAuthor {
                first_name: first_name.into(),
                family_name: family_name.into(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .expect("seed author")
    }

    pub async fn seed_genre(&self, name: &str) -> Genre {
        self.store
            .genre_create(&NewGenre { name: name.into() })
            .await
            .expect("seed genre")
    }

    pub async fn seed_book(&self, title: &str, author: &Author, genres: &[&Genre]) -> Book {
        self.store
            .book_create(&NewBook {
                title: title.into(),
                author_id: author.id,
                summary: format!("About {}", title),
                isbn: "9780000000000".into(),
                genre_ids: genres.iter().map(|g| g.id).collect(),
            })
            .await
            .expect("seed book")
    }

    pub async fn seed_book_instance(&self, book: &Book, imprint: &str) -> BookInstance {
        self.store
            .book_instance_create(&NewBookInstance {
                book_id: book.id,
                imprint: imprint.into(),
                status: BookInstanceStatus::Available,
                due_back: None,
            })
            .await
            .expect("seed book instance")
    }
}

/// Minimal form-urlencoding for test input
fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            _ => format!("%{:02X}", b),
        })
        .collect()
}

/// Identifier at the end of a redirect location
pub fn id_from_location(location: &str) -> Uuid {
    location
        .rsplit('/')
        .next()
        .and_then(|id| id.parse().ok())
        .expect("location ends with an identifier")
}
