//! Driving port for catalog reads.

use async_trait::async_trait;

use crate::domain::{Book, CatalogError, Isbn, Page};

/// Read-only queries exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Look up a single record.
    async fn find(&self, isbn: &Isbn) -> Result<Option<Book>, CatalogError>;

    /// Records within `page`, in storage order.
    async fn list(&self, page: Page) -> Result<Vec<Book>, CatalogError>;
}
