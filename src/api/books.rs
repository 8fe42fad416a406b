//! Book (catalog) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    context::RequestContext,
    error::{AppError, AppResult},
    models::book::{parse_book_id, Book, BookPayload},
    AppState,
};

use super::AuthenticatedUser;

/// Acknowledgement body for deletes
#[derive(Serialize, Deserialize, ToSchema)]
pub struct AckResponse {
    pub msg: String,
}

fn unknown_book(raw_id: &str) -> AppError {
    AppError::NotFound(format!("Book {} not found", raw_id))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse),
        (status = 504, description = "Request deadline exceeded", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list(&ctx).await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Book>> {
    let id = parse_book_id(&raw_id).ok_or_else(|| unknown_book(&raw_id))?;
    let book = state.services.catalog.show(&ctx, id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/admin/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ctx: RequestContext,
    AuthenticatedUser(claims): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<(StatusCode, Json<Book>)> {
    tracing::debug!(subject = %claims.subject, "Creating book");
    let created = state.services.catalog.create(&ctx, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/admin/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    ctx: RequestContext,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(raw_id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<Json<Book>> {
    tracing::debug!(subject = %claims.subject, id = %raw_id, "Updating book");
    let id = parse_book_id(&raw_id).ok_or_else(|| unknown_book(&raw_id))?;
    let updated = state.services.catalog.update(&ctx, id, payload).await?;
    Ok(Json(updated))
}

/// Delete a book
///
/// Deleting a book that does not exist is acknowledged the same way unless
/// strict deletes are enabled.
#[utoipa::path(
    delete,
    path = "/admin/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = AckResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found (strict deletes only)", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    ctx: RequestContext,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<AckResponse>> {
    tracing::debug!(subject = %claims.subject, id = %raw_id, "Deleting book");
    let catalog = &state.services.catalog;
    match parse_book_id(&raw_id) {
        Some(id) => catalog.delete(&ctx, id).await?,
        None => catalog.nothing_deleted(&raw_id)?,
    };

    Ok(Json(AckResponse {
        msg: "Data Deleted".to_string(),
    }))
}
