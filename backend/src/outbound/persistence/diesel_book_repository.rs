//! PostgreSQL-backed `BookRepository` implementation using Diesel ORM.
//!
//! Storage order is ascending row id. The `isbn` column carries a unique
//! constraint, so concurrent inserts of the same ISBN surface as
//! [`BookRepositoryError::DuplicateIsbn`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, Isbn, Page};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{BookRow, NewBookRow};
use super::pool::DbPool;
use super::schema::books;

/// Diesel-backed implementation of the [`BookRepository`] port.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_book(row: BookRow) -> Result<Book, BookRepositoryError> {
    let isbn = row.isbn.clone();
    Book::try_from(row).map_err(|err| {
        warn!(%isbn, error = %err, "stored ISBN failed validation");
        BookRepositoryError::query(format!("invalid stored ISBN {isbn:?}: {err}"))
    })
}

fn to_sql_bound(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl BookRepository for DieselBookRepository {
    async fn list(&self, page: Page) -> Result<Vec<Book>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = books::table
            .select(BookRow::as_select())
            .order_by(books::id.asc())
            .offset(to_sql_bound(page.skip))
            .into_boxed();
        if let Some(limit) = page.limit {
            query = query.limit(to_sql_bound(limit));
        }

        let rows: Vec<BookRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_book).collect()
    }

    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<BookRow> = books::table
            .filter(books::isbn.eq(isbn.as_str()))
            .select(BookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_book).transpose()
    }

    async fn insert(&self, book: &Book) -> Result<(), BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(books::table)
            .values(NewBookRow::from(book))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, Some(book.isbn.as_str())))
    }

    async fn delete_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let target = books::table.filter(books::isbn.eq(isbn.as_str()));
        let row: Option<BookRow> = diesel::delete(target)
            .returning(BookRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_book).transpose()
    }
}
