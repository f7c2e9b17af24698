//! Shared doubles for catalog integration tests.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catalog::domain::ports::{BookMetadataSource, BookMetadataSourceError};
use catalog::domain::{Book, CatalogService, Isbn};
use catalog::outbound::memory::InMemoryBookRepository;

pub const HITCHHIKER_ISBN: &str = "9780345391803";

pub fn isbn(raw: &str) -> Isbn {
    Isbn::new(raw).expect("valid ISBN")
}

pub fn hitchhiker() -> Book {
    Book::new(
        "The Hitchhiker's Guide to the Galaxy",
        "Douglas Adams",
        isbn(HITCHHIKER_ISBN),
    )
}

/// Metadata source answering from a fixed table; unknown ISBNs are misses.
#[derive(Clone, Default)]
pub struct StubMetadataSource {
    entries: Arc<Mutex<HashMap<String, Result<Book, BookMetadataSourceError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_book(self, book: Book) -> Self {
        self.entries
            .lock()
            .expect("entries lock")
            .insert(book.isbn.to_string(), Ok(book));
        self
    }

    pub fn with_failure(self, raw_isbn: &str, error: BookMetadataSourceError) -> Self {
        self.entries
            .lock()
            .expect("entries lock")
            .insert(raw_isbn.to_owned(), Err(error));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl BookMetadataSource for StubMetadataSource {
    async fn resolve(&self, isbn: &Isbn) -> Result<Book, BookMetadataSourceError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(isbn.to_string());
        self.entries
            .lock()
            .expect("entries lock")
            .get(isbn.as_str())
            .cloned()
            .unwrap_or_else(|| Err(BookMetadataSourceError::not_found(isbn.as_str())))
    }
}

pub type MemoryCatalog = CatalogService<InMemoryBookRepository, StubMetadataSource>;

/// Catalog service over an empty in-memory store.
pub fn memory_catalog(metadata: StubMetadataSource) -> Arc<MemoryCatalog> {
    Arc::new(CatalogService::new(
        Arc::new(InMemoryBookRepository::new()),
        Arc::new(metadata),
    ))
}
