//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the catalog and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`], so domain types
//! stay free of utoipa derives. The document backs Swagger UI in debug builds
//! and is exported by `cargo run --bin openapi-dump`.

use crate::inbound::http::books::{AddBookRequest, BookResponse, DeleteBookResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library catalog API",
        description = "Add books by ISBN from Open Library metadata, then list, find and remove them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::add_book,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::delete_book,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        BookResponse,
        AddBookRequest,
        DeleteBookResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "books", description = "Catalog records keyed by ISBN"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
