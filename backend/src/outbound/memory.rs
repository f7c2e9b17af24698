//! In-memory `BookRepository`, used for ephemeral servers and tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, Isbn, Page};

/// Catalog held in a vector; insertion order is storage order.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: Mutex<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository. Later duplicates of an ISBN are ignored.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let mut seeded: Vec<Book> = Vec::new();
        for book in books {
            if !seeded.iter().any(|kept| kept.isbn == book.isbn) {
                seeded.push(book);
            }
        }
        Self {
            books: Mutex::new(seeded),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Book>> {
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list(&self, page: Page) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(page.apply(self.lock().iter().cloned()).collect())
    }

    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError> {
        Ok(self.lock().iter().find(|book| &book.isbn == isbn).cloned())
    }

    async fn insert(&self, book: &Book) -> Result<(), BookRepositoryError> {
        let mut books = self.lock();
        if books.iter().any(|stored| stored.isbn == book.isbn) {
            return Err(BookRepositoryError::duplicate_isbn(book.isbn.as_str()));
        }
        books.push(book.clone());
        Ok(())
    }

    async fn delete_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError> {
        let mut books = self.lock();
        Ok(books
            .iter()
            .position(|book| &book.isbn == isbn)
            .map(|index| books.remove(index)))
    }
}
