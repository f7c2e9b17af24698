//! Driven port for resolving an ISBN into a catalog record.

use async_trait::async_trait;

use crate::domain::{Book, Isbn};

use super::define_port_error;

define_port_error! {
    /// Resolution failures reported by metadata adapters.
    pub enum BookMetadataSourceError {
        /// The source answered but holds no entry for the ISBN.
        NotFound { isbn: String } =>
            "no metadata found for ISBN {isbn}",
        /// The source could not be reached or answered with an error.
        Unreachable { message: String } =>
            "metadata source unreachable: {message}",
    }
}

/// Port for looking up bibliographic metadata.
///
/// Implementations perform exactly one lookup per call and apply the title
/// and author placeholders from [`Book::from_metadata`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookMetadataSource: Send + Sync {
    /// Resolve `isbn` into a normalised [`Book`].
    async fn resolve(&self, isbn: &Isbn) -> Result<Book, BookMetadataSourceError>;
}
