//! Repository layer: the book store contract and its implementations

pub mod books;
pub mod memory;

use async_trait::async_trait;

use crate::{
    context::RequestContext,
    error::AppResult,
    models::{Book, BookId, BookPayload},
};

pub use books::PgBookStore;
pub use memory::MemoryBookStore;

/// Persistence contract for catalog books.
///
/// Every call receives the caller's [`RequestContext`]; implementations must
/// return `Timeout`/`Cancelled` promptly once it ends instead of completing
/// silently. Soft-deleted rows are invisible to every operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All live books, oldest first
    async fn all(&self, ctx: &RequestContext) -> AppResult<Vec<Book>>;

    /// `NotFound` if no live row matches
    async fn show(&self, ctx: &RequestContext, id: BookId) -> AppResult<Book>;

    /// Persist a new book, assigning its id and timestamps
    async fn create(&self, ctx: &RequestContext, book: BookPayload) -> AppResult<Book>;

    /// Apply the present fields and return the post-update state
    async fn update(&self, ctx: &RequestContext, id: BookId, book: BookPayload) -> AppResult<Book>;

    /// Soft-delete; `true` when a live row was affected
    async fn delete(&self, ctx: &RequestContext, id: BookId) -> AppResult<bool>;

    /// Readiness probe
    async fn ping(&self, ctx: &RequestContext) -> AppResult<()>;
}
