//! Book domain methods on Repository

use sqlx::{postgres::PgRow, Row};
use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::{Author, Book, BookDetail, BookTitle, BookWithAuthor, Genre, NewBook},
};

const BOOK_COLUMNS: &str = "id, title, author_id, summary, isbn, genre_ids";

/// Read a book selected with `b_`-prefixed columns from an outer join.
/// Returns `None` when the joined side is empty.
pub(crate) fn joined_book(row: &PgRow) -> Result<Option<Book>, sqlx::Error> {
    let Some(id) = row.try_get::<Option<Uuid>, _>("b_id")? else {
        return Ok(None);
    };
    Ok(Some(Book {
        id,
        title: row.try_get("b_title")?,
        author_id: row.try_get("b_author_id")?,
        summary: row.try_get("b_summary")?,
        isbn: row.try_get("b_isbn")?,
        genre_ids: row.try_get("b_genre_ids")?,
    }))
}

fn joined_author(row: &PgRow) -> Result<Option<Author>, sqlx::Error> {
    let Some(id) = row.try_get::<Option<Uuid>, _>("a_id")? else {
        return Ok(None);
    };
    Ok(Some(Author {
        id,
        first_name: row.try_get("a_first_name")?,
        family_name: row.try_get("a_family_name")?,
        date_of_birth: row.try_get("a_date_of_birth")?,
        date_of_death: row.try_get("a_date_of_death")?,
    }))
}

impl Repository {
    /// Identifier and title of every book, sorted by title
    pub async fn books_titles(&self) -> AppResult<Vec<BookTitle>> {
        let rows = sqlx::query_as::<_, BookTitle>("SELECT id, title FROM books ORDER BY title, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// All books with their author, sorted by title
    pub async fn books_list(&self) -> AppResult<Vec<BookWithAuthor>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id AS b_id, b.title AS b_title, b.author_id AS b_author_id,
                   b.summary AS b_summary, b.isbn AS b_isbn, b.genre_ids AS b_genre_ids,
                   a.id AS a_id, a.first_name AS a_first_name, a.family_name AS a_family_name,
                   a.date_of_birth AS a_date_of_birth, a.date_of_death AS a_date_of_death
            FROM books b
            LEFT JOIN authors a ON a.id = b.author_id
            ORDER BY b.title, b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut books = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Some(book) = joined_book(row)? {
                books.push(BookWithAuthor {
                    book,
                    author: joined_author(row)?,
                });
            }
        }
        Ok(books)
    }

    /// Book with author and genres populated
    pub async fn books_get(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let Some(book) = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let (author, genres) = tokio::try_join!(
            self.authors_get(book.author_id),
            self.books_genres(&book.genre_ids),
        )?;

        Ok(Some(BookDetail {
            book,
            author,
            genres,
        }))
    }

    /// Genres for the given identifiers, in the given order; unknown ones are skipped
    async fn books_genres(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, Genre>(
            "SELECT id, name FROM genres WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids
            .iter()
            .filter_map(|id| rows.iter().find(|g| g.id == *id).cloned())
            .collect())
    }

    pub async fn books_list_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE author_id = $1 ORDER BY title, id",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn books_list_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE $1 = ANY(genre_ids) ORDER BY title, id",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(genre_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn books_create(&self, data: &NewBook) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn, genre_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(Self::next_id())
            .bind(&data.title)
            .bind(data.author_id)
            .bind(&data.summary)
            .bind(&data.isbn)
            .bind(&data.genre_ids)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Replace every field of the book at `id`
    pub async fn books_update(&self, id: Uuid, data: &NewBook) -> AppResult<Option<Book>> {
        let query = format!(
            r#"
            UPDATE books
            SET title = $2, author_id = $3, summary = $4, isbn = $5, genre_ids = $6
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&data.title)
            .bind(data.author_id)
            .bind(&data.summary)
            .bind(&data.isbn)
            .bind(&data.genre_ids)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn books_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
