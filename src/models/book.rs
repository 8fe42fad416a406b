//! Book (catalog entry) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Store-assigned book identifier
pub type BookId = i64;

/// Catalog book as stored and returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: BookId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker, never exposed
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Book {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Overwrite the fields present in `payload`
    pub fn apply(&mut self, payload: BookPayload, now: DateTime<Utc>) {
        if let Some(isbn) = payload.isbn {
            self.isbn = Some(isbn);
        }
        if let Some(title) = payload.title {
            self.title = Some(title);
        }
        if let Some(author) = payload.author {
            self.author = Some(author);
        }
        if let Some(price) = payload.price {
            self.price = Some(price);
        }
        self.updated_at = now.max(self.created_at);
    }
}

/// Create / update request body. Absent fields are left untouched on update;
/// ids and timestamps sent by clients are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct BookPayload {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
}

/// Parse a path id. Anything that is not a non-negative integer fitting the
/// id column yields `None`, which callers treat as a lookup that cannot match.
pub fn parse_book_id(raw: &str) -> Option<BookId> {
    raw.parse::<u64>()
        .ok()
        .and_then(|id| BookId::try_from(id).ok())
}
