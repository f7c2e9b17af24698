//! Failures returned by catalog operations.
//!
//! Inbound adapters decide how to render these: the HTTP layer converts them
//! into [`Error`] payloads, the console prints a message and keeps looping.

use serde_json::json;
use thiserror::Error as ThisError;

use crate::domain::{Error, Isbn};

/// Where a missing record was looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundScope {
    /// The ISBN is not stored in the catalog.
    Catalog,
    /// The metadata source has no entry for the ISBN.
    MetadataSource,
}

/// Outcome taxonomy for catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CatalogError {
    #[error("Book with ISBN {isbn} already exists.")]
    AlreadyExists { isbn: Isbn },
    #[error("{}", not_found_message(isbn, *scope))]
    NotFound { isbn: Isbn, scope: NotFoundScope },
    #[error("{message}")]
    Unreachable { message: String },
    #[error("{message}")]
    Storage { message: String },
}

fn not_found_message(isbn: &Isbn, scope: NotFoundScope) -> String {
    match scope {
        NotFoundScope::Catalog => format!("Book with ISBN {isbn} not found."),
        NotFoundScope::MetadataSource => {
            format!("No book found with ISBN {isbn} in Open Library.")
        }
    }
}

impl CatalogError {
    pub fn already_exists(isbn: Isbn) -> Self {
        Self::AlreadyExists { isbn }
    }

    pub fn not_in_catalog(isbn: Isbn) -> Self {
        Self::NotFound {
            isbn,
            scope: NotFoundScope::Catalog,
        }
    }

    pub fn not_in_metadata_source(isbn: Isbn) -> Self {
        Self::NotFound {
            isbn,
            scope: NotFoundScope::MetadataSource,
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Stable reason tag carried in error payload details.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::AlreadyExists { .. } => "already_exists",
            Self::NotFound { .. } => "not_found",
            Self::Unreachable { .. } => "unreachable",
            Self::Storage { .. } => "storage",
        }
    }

    fn isbn(&self) -> Option<&Isbn> {
        match self {
            Self::AlreadyExists { isbn } | Self::NotFound { isbn, .. } => Some(isbn),
            Self::Unreachable { .. } | Self::Storage { .. } => None,
        }
    }
}

impl From<CatalogError> for Error {
    fn from(value: CatalogError) -> Self {
        let details = json!({
            "reason": value.reason(),
            "isbn": value.isbn().map(Isbn::as_str),
        });
        let message = match value.to_string() {
            text if text.trim().is_empty() => value.reason().replace('_', " "),
            text => text,
        };
        let error = match value {
            CatalogError::AlreadyExists { .. } => Error::conflict(message),
            CatalogError::NotFound { .. } => Error::not_found(message),
            CatalogError::Unreachable { .. } => Error::service_unavailable(message),
            CatalogError::Storage { .. } => Error::internal(message),
        };
        error.with_details(details)
    }
}
