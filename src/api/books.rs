//! Book endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{StatusCode, Uri},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, BookPayload, BookQuery, BookShort},
    AppState,
};

use super::{ApiResponse, MessageResponse};

/// Payload of a successful creation
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookCreated {
    pub book_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookShort>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetail {
    pub book: Book,
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added, envelope `data` holds the new id", body = BookCreated),
        (status = 400, description = "Missing name, readPage above pageCount, or malformed body", body = MessageResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookCreated>>)> {
    let Json(payload) = payload?;
    let book_id = state.services.books.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Book added successfully",
            BookCreated { book_id },
        )),
    ))
}

/// List books, optionally filtered by a single criterion
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Books in insertion order, envelope `data` holds the list", body = BookList)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    uri: Uri,
    query: Result<Query<BookQuery>, QueryRejection>,
) -> Json<ApiResponse<BookList>> {
    // Listing never fails: a query the strict parse refuses (such as a
    // repeated key) is read pair by pair instead.
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!("Lenient query parse after rejection: {}", rejection.body_text());
            Query::<Vec<(String, String)>>::try_from_uri(&uri)
                .map(|Query(pairs)| BookQuery::from_pairs(pairs))
                .unwrap_or_default()
        }
    };

    let books = state.services.books.list(&query).await;
    Json(ApiResponse::success(BookList { books }))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Full book record, envelope `data` holds it", body = BookDetail),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<ApiResponse<BookDetail>>> {
    let book = state.services.books.get_by_id(&book_id).await?;
    Ok(Json(ApiResponse::success(BookDetail { book })))
}

/// Replace a book's fields
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book id")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Missing name, readPage above pageCount, or malformed body", body = MessageResponse),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(payload) = payload?;
    state.services.books.update(&book_id, payload).await?;
    Ok(Json(MessageResponse::success("Book updated successfully")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = MessageResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(&book_id).await?;
    Ok(Json(MessageResponse::success("Book deleted successfully")))
}
