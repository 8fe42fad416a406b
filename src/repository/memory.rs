//! In-process book store, used for local runs and tests

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    context::RequestContext,
    error::{AppError, AppResult},
    models::{Book, BookId, BookPayload},
};

#[derive(Default)]
struct Rows {
    last_id: BookId,
    books: BTreeMap<BookId, Book>,
}

#[derive(Default)]
pub struct MemoryBookStore {
    rows: RwLock<Rows>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows including soft-deleted ones
    #[cfg(test)]
    pub(crate) async fn len_with_deleted(&self) -> usize {
        self.rows.read().await.books.len()
    }
}

fn not_found(id: BookId) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn all(&self, ctx: &RequestContext) -> AppResult<Vec<Book>> {
        ctx.check()?;
        let rows = self.rows.read().await;
        Ok(rows
            .books
            .values()
            .filter(|b| !b.is_deleted())
            .cloned()
            .collect())
    }

    async fn show(&self, ctx: &RequestContext, id: BookId) -> AppResult<Book> {
        ctx.check()?;
        let rows = self.rows.read().await;
        rows.books
            .get(&id)
            .filter(|b| !b.is_deleted())
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, ctx: &RequestContext, book: BookPayload) -> AppResult<Book> {
        ctx.check()?;
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let now = Utc::now();
        let created = Book {
            id: rows.last_id,
            isbn: book.isbn,
            title: book.title,
            author: book.author,
            price: book.price,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.books.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, ctx: &RequestContext, id: BookId, book: BookPayload) -> AppResult<Book> {
        ctx.check()?;
        let mut rows = self.rows.write().await;
        let stored = rows
            .books
            .get_mut(&id)
            .filter(|b| !b.is_deleted())
            .ok_or_else(|| not_found(id))?;
        stored.apply(book, Utc::now());
        Ok(stored.clone())
    }

    async fn delete(&self, ctx: &RequestContext, id: BookId) -> AppResult<bool> {
        ctx.check()?;
        let mut rows = self.rows.write().await;
        match rows.books.get_mut(&id).filter(|b| !b.is_deleted()) {
            Some(stored) => {
                stored.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self, ctx: &RequestContext) -> AppResult<()> {
        ctx.check()
    }
}
