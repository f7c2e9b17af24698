//! Catalog domain: records, identifiers, ports and the catalog service.
//!
//! Public surface:
//! - [`Book`] and [`Isbn`]: the normalised record and its key.
//! - [`CatalogService`]: implements the driving ports over injected adapters.
//! - [`CatalogError`]: outcome taxonomy recovered by inbound adapters.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic error payload.

pub mod book;
pub mod catalog_error;
pub mod catalog_service;
pub mod error;
pub mod page;
pub mod ports;
pub mod trace_id;

pub use self::book::{Book, ISBN_MAX, Isbn, IsbnValidationError, UNKNOWN_AUTHOR, UNKNOWN_TITLE};
pub use self::catalog_error::{CatalogError, NotFoundScope};
pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::page::{DEFAULT_PAGE_LIMIT, Page};
pub use self::trace_id::TraceId;

/// Result alias used by HTTP handlers.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use catalog::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
