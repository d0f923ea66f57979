//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
    AppState,
};

/// Catalog search query
#[derive(Deserialize, ToSchema)]
pub struct SearchQuery {
    pub query: String,
}

/// Book list response
#[derive(Serialize, ToSchema)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

/// Mutation acknowledgement
#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

/// Book creation response
#[derive(Serialize, ToSchema)]
pub struct BookCreatedResponse {
    pub status: String,
    pub message: String,
    pub book_id: i64,
}

/// Search books by id, name or author
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("query" = String, Query, description = "Substring matched against id, name and author")
    ),
    responses(
        (status = 200, description = "Matching books", body = BooksResponse)
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<BooksResponse>> {
    let books = state.services.catalog.search(&query.query).await?;
    tracing::debug!(query = %query.query, count = books.len(), "book search");
    Ok(Json(BooksResponse { books }))
}

/// Add a new book to the catalog (librarian)
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book added", body = BookCreatedResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookCreatedResponse>)> {
    let book_id = state.services.catalog.create(book).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            status: "success".to_string(),
            message: "New book added successfully".to_string(),
            book_id,
        }),
    ))
}

/// Update book information (librarian)
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = StatusResponse),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    Json(update): Json<UpdateBook>,
) -> AppResult<Json<StatusResponse>> {
    state.services.catalog.update(book_id, update).await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
        message: "Book information updated successfully".to_string(),
    }))
}

/// Delete a book and its loan history (librarian)
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = StatusResponse),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book has active borrowings")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> AppResult<Json<StatusResponse>> {
    let book_name = state.services.catalog.delete(book_id).await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
        message: format!("Book {} deleted successfully", book_name),
    }))
}
