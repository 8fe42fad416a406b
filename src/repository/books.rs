//! Postgres-backed book store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookStore;
use crate::{
    context::RequestContext,
    error::{AppError, AppResult},
    models::{Book, BookId, BookPayload},
};

const BOOK_COLUMNS: &str =
    "id, isbn, title, author, price, created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn all(&self, ctx: &RequestContext) -> AppResult<Vec<Book>> {
        ctx.check()?;
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn show(&self, ctx: &RequestContext, id: BookId) -> AppResult<Book> {
        ctx.check()?;
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn create(&self, ctx: &RequestContext, book: BookPayload) -> AppResult<Book> {
        ctx.check()?;
        let row = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (isbn, title, author, price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, ctx: &RequestContext, id: BookId, book: BookPayload) -> AppResult<Book> {
        ctx.check()?;
        // updated_at never precedes created_at
        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books SET
                isbn = COALESCE($2, isbn),
                title = COALESCE($3, title),
                author = COALESCE($4, author),
                price = COALESCE($5, price),
                updated_at = GREATEST(NOW(), created_at)
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.price)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn delete(&self, ctx: &RequestContext, id: BookId) -> AppResult<bool> {
        ctx.check()?;
        let result = sqlx::query(
            "UPDATE books SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self, ctx: &RequestContext) -> AppResult<()> {
        ctx.check()?;
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
