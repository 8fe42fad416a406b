//! Catalog service: runs store calls under the request context and decides
//! how store outcomes surface to clients

use std::sync::Arc;

use crate::{
    config::CatalogConfig,
    context::RequestContext,
    error::{AppError, AppResult},
    models::{Book, BookId, BookPayload},
    repository::BookStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
    config: CatalogConfig,
}

/// What a delete request amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NothingToDelete,
}

fn not_found(id: BookId) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Book>> {
        ctx.run(self.store.all(ctx)).await
    }

    pub async fn show(&self, ctx: &RequestContext, id: BookId) -> AppResult<Book> {
        ctx.run(self.store.show(ctx, id)).await
    }

    pub async fn create(&self, ctx: &RequestContext, payload: BookPayload) -> AppResult<Book> {
        let book = ctx.run(self.store.create(ctx, payload)).await?;
        tracing::info!(id = book.id, "Created book");
        Ok(book)
    }

    /// Existence is checked first; an absent book is never handed to the
    /// store's update path. Store failures other than cancellation read as
    /// not found.
    pub async fn update(&self, ctx: &RequestContext, id: BookId, payload: BookPayload) -> AppResult<Book> {
        let mask = |e: AppError| {
            if e.is_cancellation() {
                e
            } else {
                tracing::debug!(id, error = %e, "Update failed");
                not_found(id)
            }
        };

        ctx.run(self.store.show(ctx, id)).await.map_err(mask)?;
        let book = ctx
            .run(self.store.update(ctx, id, payload))
            .await
            .map_err(mask)?;
        tracing::info!(id, "Updated book");
        Ok(book)
    }

    /// Deletes unconditionally. Unless `strict_delete` is set, deleting a
    /// missing book is acknowledged like any other delete.
    pub async fn delete(&self, ctx: &RequestContext, id: BookId) -> AppResult<DeleteOutcome> {
        let removed = ctx.run(self.store.delete(ctx, id)).await?;
        if removed {
            tracing::info!(id, "Deleted book");
            return Ok(DeleteOutcome::Deleted);
        }
        self.nothing_deleted(&id.to_string())
    }

    /// Outcome for a delete that matched no live book, including ids that
    /// could never match
    pub fn nothing_deleted(&self, id: &str) -> AppResult<DeleteOutcome> {
        tracing::debug!(id, "Delete matched no live book");
        if self.config.strict_delete {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(DeleteOutcome::NothingToDelete)
    }

    pub async fn ping(&self, ctx: &RequestContext) -> AppResult<()> {
        ctx.run(self.store.ping(ctx)).await
    }
}
