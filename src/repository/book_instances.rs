//! Book instance domain methods on Repository

use sqlx::{postgres::PgRow, FromRow};
use uuid::Uuid;

use super::{books::joined_book, Repository};
use crate::{
    error::AppResult,
    models::{BookInstance, BookInstanceDetail, BookInstanceStatus, NewBookInstance},
};

const INSTANCE_COLUMNS: &str = "id, book_id, imprint, status, due_back";

/// Book instance columns plus the referenced book, `b_`-prefixed
const POPULATED_SELECT: &str = r#"
    SELECT bi.id, bi.book_id, bi.imprint, bi.status, bi.due_back,
           b.id AS b_id, b.title AS b_title, b.author_id AS b_author_id,
           b.summary AS b_summary, b.isbn AS b_isbn, b.genre_ids AS b_genre_ids
    FROM book_instances bi
    LEFT JOIN books b ON b.id = bi.book_id
"#;

fn populated(row: &PgRow) -> Result<BookInstanceDetail, sqlx::Error> {
    Ok(BookInstanceDetail {
        instance: BookInstance::from_row(row)?,
        book: joined_book(row)?,
    })
}

impl Repository {
    /// All instances with their book, in identifier order
    pub async fn book_instances_list(&self) -> AppResult<Vec<BookInstanceDetail>> {
        let query = format!("{} ORDER BY bi.id", POPULATED_SELECT);
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let instances = rows
            .iter()
            .map(populated)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(instances)
    }

    pub async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        let query = format!("{} WHERE bi.id = $1", POPULATED_SELECT);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(populated).transpose()?)
    }

    pub async fn book_instances_list_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let query = format!(
            "SELECT {} FROM book_instances WHERE book_id = $1 ORDER BY id",
            INSTANCE_COLUMNS
        );
        let rows = sqlx::query_as::<_, BookInstance>(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn book_instances_create(&self, data: &NewBookInstance) -> AppResult<BookInstance> {
        let query = format!(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        );
        let row = sqlx::query_as::<_, BookInstance>(&query)
            .bind(Self::next_id())
            .bind(data.book_id)
            .bind(&data.imprint)
            .bind(data.status.as_str())
            .bind(data.due_back)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Replace every field of the instance at `id`
    pub async fn book_instances_update(
        &self,
        id: Uuid,
        data: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>> {
        let query = format!(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        );
        let row = sqlx::query_as::<_, BookInstance>(&query)
            .bind(id)
            .bind(data.book_id)
            .bind(&data.imprint)
            .bind(data.status.as_str())
            .bind(data.due_back)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count instances, optionally only those with the given status
    pub async fn book_instances_count(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
