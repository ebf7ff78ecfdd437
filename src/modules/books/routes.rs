//! HTTP handlers for the book collection.
//!
//! Every handler is a placeholder with a fixed response. The documented
//! responses describe the intended contract.

use alistore_http::{
    error::{AppError, ErrorResponse},
    extract::{ApiJson, ApiPath, ApiQuery},
};
use axum::{http::StatusCode, Json};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use uuid::Uuid;

use super::models::{Book, BookRequest, Pagination};

pub const BOOK_TAG: &str = "Book Management";

#[derive(OpenApi)]
#[openapi(components(schemas(Book, BookRequest)))]
struct BookSchemas;

/// Documented router for `/books`, relative to the module mount point.
pub fn router() -> OpenApiRouter {
    OpenApiRouter::with_openapi(BookSchemas::openapi())
        .routes(routes!(list_books, create_book))
        .routes(routes!(get_book, update_book, delete_book))
}

#[utoipa::path(
    get,
    path = "",
    tag = BOOK_TAG,
    summary = "Get all books",
    description = "Returns a list of all books with optional pagination",
    params(Pagination),
    responses(
        (status = 200, description = "Successfully retrieved the list of books", body = Vec<Book>),
        (status = 400, description = "Malformed pagination parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized - Authentication is required")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_books(ApiQuery(pagination): ApiQuery<Pagination>) -> Json<Vec<Book>> {
    tracing::debug!(
        page = pagination.page(),
        size = pagination.size(),
        "listing books"
    );
    Json(Vec::new())
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = BOOK_TAG,
    summary = "Get a book by ID",
    description = "Returns a single book by its ID",
    params(("id" = Uuid, Path, description = "ID of the book to retrieve")),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 400, description = "Malformed book ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized - Authentication is required"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_book(ApiPath(id): ApiPath<Uuid>) -> Result<Json<Book>, AppError> {
    Err(AppError::not_found(format!("book {} not found", id)))
}

#[utoipa::path(
    post,
    path = "",
    tag = BOOK_TAG,
    summary = "Create a new book",
    description = "Creates a new book entry in the system",
    request_body(content = BookRequest, description = "Book data to create"),
    responses(
        (status = 201, description = "Book created successfully", body = Book),
        (status = 400, description = "Invalid input data", body = ErrorResponse),
        (status = 401, description = "Unauthorized - Authentication is required"),
        (status = 415, description = "Body is not JSON", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_book(ApiJson(_request): ApiJson<BookRequest>) -> StatusCode {
    tracing::debug!("create book accepted");
    StatusCode::OK
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = BOOK_TAG,
    summary = "Update a book",
    description = "Updates an existing book's information",
    params(("id" = Uuid, Path, description = "ID of the book to update")),
    request_body(content = BookRequest, description = "Updated book data"),
    responses(
        (status = 200, description = "Book updated successfully", body = Book),
        (status = 400, description = "Malformed book ID or body", body = ErrorResponse),
        (status = 401, description = "Unauthorized - Authentication is required"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_book(
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(_request): ApiJson<BookRequest>,
) -> StatusCode {
    tracing::debug!("update book accepted");
    StatusCode::OK
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = BOOK_TAG,
    summary = "Delete a book",
    description = "Deletes a book from the system",
    params(("id" = Uuid, Path, description = "ID of the book to delete")),
    responses(
        (status = 204, description = "Book deleted successfully"),
        (status = 400, description = "Malformed book ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized - Authentication is required"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_book(ApiPath(id): ApiPath<Uuid>) -> StatusCode {
    tracing::debug!("delete book accepted");
    StatusCode::NO_CONTENT
}
