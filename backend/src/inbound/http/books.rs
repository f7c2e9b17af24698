//! Catalog CRUD endpoints.
//!
//! ```text
//! GET    /books?skip=&limit=
//! POST   /books            {"isbn": "..."}
//! GET    /books/{isbn}
//! DELETE /books/{isbn}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Book, CatalogError, DEFAULT_PAGE_LIMIT, Page};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_isbn;

/// Confirmation message returned by `DELETE /books/{isbn}`.
pub const DELETE_CONFIRMATION: &str = "Book successfully deleted";

/// Catalog record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    #[schema(example = "The Hitchhiker's Guide to the Galaxy")]
    pub title: String,
    #[schema(example = "Douglas Adams")]
    pub author: String,
    #[schema(example = "9780345391803")]
    pub isbn: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            title: book.title,
            author: book.author,
            isbn: book.isbn.into(),
        }
    }
}

/// Request body for `POST /books`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddBookRequest {
    #[schema(example = "9780345391803")]
    pub isbn: String,
}

/// Paging parameters for `GET /books`.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBooksQuery {
    /// Records to skip, in storage order. Defaults to 0.
    pub skip: Option<usize>,
    /// Maximum records returned. Defaults to 100.
    pub limit: Option<usize>,
}

impl From<ListBooksQuery> for Page {
    fn from(query: ListBooksQuery) -> Self {
        Page::new(
            query.skip.unwrap_or(0),
            Some(query.limit.unwrap_or(DEFAULT_PAGE_LIMIT)),
        )
    }
}

/// Response body for `DELETE /books/{isbn}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteBookResponse {
    #[schema(example = "Book successfully deleted")]
    pub message: String,
    #[schema(example = "9780345391803")]
    pub isbn: String,
}

/// List catalog records.
#[utoipa::path(
    get,
    path = "/books",
    params(ListBooksQuery),
    responses(
        (status = 200, description = "Records in storage order", body = [BookResponse]),
        (status = 400, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBooks"
)]
#[get("/books")]
pub async fn list_books(
    state: web::Data<HttpState>,
    query: web::Query<ListBooksQuery>,
) -> ApiResult<web::Json<Vec<BookResponse>>> {
    let books = state.catalog_query.list(query.into_inner().into()).await?;
    Ok(web::Json(books.into_iter().map(BookResponse::from).collect()))
}

/// Resolve an ISBN through the metadata source and add it to the catalog.
#[utoipa::path(
    post,
    path = "/books",
    request_body = AddBookRequest,
    responses(
        (status = 201, description = "Record created", body = BookResponse),
        (status = 400, description = "Invalid ISBN", body = ErrorSchema),
        (status = 404, description = "No metadata for this ISBN", body = ErrorSchema),
        (status = 409, description = "ISBN already catalogued", body = ErrorSchema),
        (status = 503, description = "Metadata source unreachable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "addBook"
)]
#[post("/books")]
pub async fn add_book(
    state: web::Data<HttpState>,
    payload: web::Json<AddBookRequest>,
) -> ApiResult<HttpResponse> {
    let isbn = parse_isbn("isbn", &payload.isbn)?;
    let book = state.catalog.add(&isbn).await?;
    Ok(HttpResponse::Created().json(BookResponse::from(book)))
}

/// Fetch one record.
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "Catalog key")),
    responses(
        (status = 200, description = "Stored record", body = BookResponse),
        (status = 400, description = "Invalid ISBN", body = ErrorSchema),
        (status = 404, description = "Not in the catalog", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBook"
)]
#[get("/books/{isbn}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookResponse>> {
    let isbn = parse_isbn("isbn", &path)?;
    match state.catalog_query.find(&isbn).await? {
        Some(book) => Ok(web::Json(book.into())),
        None => Err(CatalogError::not_in_catalog(isbn).into()),
    }
}

/// Remove one record.
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "Catalog key")),
    responses(
        (status = 200, description = "Record removed", body = DeleteBookResponse),
        (status = 400, description = "Invalid ISBN", body = ErrorSchema),
        (status = 404, description = "Not in the catalog", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "deleteBook"
)]
#[delete("/books/{isbn}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteBookResponse>> {
    let isbn = parse_isbn("isbn", &path)?;
    let removed = state.catalog.remove(&isbn).await?;
    Ok(web::Json(DeleteBookResponse {
        message: DELETE_CONFIRMATION.to_owned(),
        isbn: removed.isbn.into(),
    }))
}

#[cfg(test)]
#[path = "books_tests.rs"]
mod tests;
