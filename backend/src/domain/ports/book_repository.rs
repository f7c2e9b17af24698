//! Driven port for catalog persistence.
//!
//! Adapters keep records in storage order and treat the ISBN as a unique
//! key. Every mutation is durable before the call returns.

use async_trait::async_trait;

use crate::domain::{Book, Isbn, Page};

use super::define_port_error;

define_port_error! {
    /// Errors raised by book repository adapters.
    pub enum BookRepositoryError {
        /// The backing store could not be opened or reached.
        Connection { message: String } =>
            "book repository connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } =>
            "book repository query failed: {message}",
        /// An insert collided with an existing record.
        DuplicateIsbn { isbn: String } =>
            "book with ISBN {isbn} already stored",
    }
}

/// Port for storing and retrieving catalog records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Records within `page`, in storage order.
    async fn list(&self, page: Page) -> Result<Vec<Book>, BookRepositoryError>;

    /// Fetch the record stored under `isbn`.
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError>;

    /// Append `book`, failing with
    /// [`BookRepositoryError::DuplicateIsbn`] when its ISBN is already stored.
    async fn insert(&self, book: &Book) -> Result<(), BookRepositoryError>;

    /// Delete the record stored under `isbn`, returning it when present.
    async fn delete_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError>;
}
