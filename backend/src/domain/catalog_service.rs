//! Catalog domain service.
//!
//! Implements the driving ports on top of a [`BookRepository`] and a
//! [`BookMetadataSource`]. `add` checks for a duplicate before resolving, so
//! an already-stored ISBN never triggers a lookup.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    BookMetadataSource, BookMetadataSourceError, BookRepository, BookRepositoryError,
    CatalogCommand, CatalogQuery,
};
use crate::domain::{Book, CatalogError, Isbn, Page};

/// Catalog service implementing [`CatalogCommand`] and [`CatalogQuery`].
pub struct CatalogService<R: ?Sized, M: ?Sized> {
    books: Arc<R>,
    metadata: Arc<M>,
}

impl<R: ?Sized, M: ?Sized> Clone for CatalogService<R, M> {
    fn clone(&self) -> Self {
        Self {
            books: Arc::clone(&self.books),
            metadata: Arc::clone(&self.metadata),
        }
    }
}

impl<R: ?Sized, M: ?Sized> CatalogService<R, M> {
    /// Create a service over the given adapters.
    pub fn new(books: Arc<R>, metadata: Arc<M>) -> Self {
        Self { books, metadata }
    }
}

impl<R, M> CatalogService<R, M>
where
    R: BookRepository + ?Sized,
    M: BookMetadataSource + ?Sized,
{
    fn map_repository_error(isbn: Option<&Isbn>, error: BookRepositoryError) -> CatalogError {
        match (error, isbn) {
            (BookRepositoryError::DuplicateIsbn { .. }, Some(isbn)) => {
                CatalogError::already_exists(isbn.clone())
            }
            (error, _) => {
                debug!(%error, "book repository failure");
                CatalogError::storage(error.to_string())
            }
        }
    }

    fn map_resolution_error(isbn: &Isbn, error: BookMetadataSourceError) -> CatalogError {
        match error {
            BookMetadataSourceError::NotFound { .. } => {
                CatalogError::not_in_metadata_source(isbn.clone())
            }
            BookMetadataSourceError::Unreachable { message } => {
                CatalogError::unreachable(message)
            }
        }
    }
}

#[async_trait]
impl<R, M> CatalogCommand for CatalogService<R, M>
where
    R: BookRepository + ?Sized,
    M: BookMetadataSource + ?Sized,
{
    async fn add(&self, isbn: &Isbn) -> Result<Book, CatalogError> {
        let existing = self
            .books
            .find_by_isbn(isbn)
            .await
            .map_err(|err| Self::map_repository_error(None, err))?;
        if existing.is_some() {
            return Err(CatalogError::already_exists(isbn.clone()));
        }

        let book = self.metadata.resolve(isbn).await.map_err(|err| {
            warn!(%isbn, error = %err, "metadata resolution failed");
            Self::map_resolution_error(isbn, err)
        })?;

        self.books
            .insert(&book)
            .await
            .map_err(|err| Self::map_repository_error(Some(isbn), err))?;
        info!(%isbn, title = %book.title, "book added");
        Ok(book)
    }

    async fn remove(&self, isbn: &Isbn) -> Result<Book, CatalogError> {
        let removed = self
            .books
            .delete_by_isbn(isbn)
            .await
            .map_err(|err| Self::map_repository_error(None, err))?;
        match removed {
            Some(book) => {
                info!(%isbn, "book removed");
                Ok(book)
            }
            None => Err(CatalogError::not_in_catalog(isbn.clone())),
        }
    }
}

#[async_trait]
impl<R, M> CatalogQuery for CatalogService<R, M>
where
    R: BookRepository + ?Sized,
    M: BookMetadataSource + ?Sized,
{
    async fn find(&self, isbn: &Isbn) -> Result<Option<Book>, CatalogError> {
        self.books
            .find_by_isbn(isbn)
            .await
            .map_err(|err| Self::map_repository_error(None, err))
    }

    async fn list(&self, page: Page) -> Result<Vec<Book>, CatalogError> {
        self.books
            .list(page)
            .await
            .map_err(|err| Self::map_repository_error(None, err))
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
