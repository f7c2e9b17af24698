//! Internal Diesel row structs for the `books` table.
//!
//! These never leave the persistence layer.

use diesel::prelude::*;

use super::schema::books;
use crate::domain::{Book, Isbn, IsbnValidationError};

/// Row struct for reading from the books table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    #[expect(dead_code, reason = "selected for ordering; not part of the domain record")]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

impl TryFrom<BookRow> for Book {
    type Error = IsbnValidationError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book::new(row.title, row.author, Isbn::new(row.isbn)?))
    }
}

/// Insertable struct for new catalog rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub(crate) struct NewBookRow<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub isbn: &'a str,
}

impl<'a> From<&'a Book> for NewBookRow<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            title: book.title.as_str(),
            author: book.author.as_str(),
            isbn: book.isbn.as_str(),
        }
    }
}
