//! Driving port for catalog mutations.

use async_trait::async_trait;

use crate::domain::{Book, CatalogError, Isbn};

/// Mutations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    /// Resolve `isbn` and store the resulting record.
    async fn add(&self, isbn: &Isbn) -> Result<Book, CatalogError>;

    /// Remove the record stored under `isbn` and return it.
    async fn remove(&self, isbn: &Isbn) -> Result<Book, CatalogError>;
}
