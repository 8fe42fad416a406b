//! Data models for the bookstore

pub mod book;
pub mod claims;

// Re-export commonly used types
pub use book::{Book, BookId, BookPayload};
pub use claims::AuthClaims;
