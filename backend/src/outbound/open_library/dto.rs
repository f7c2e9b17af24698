//! DTOs for decoding Open Library `jscmd=data` responses.
//!
//! The response is an object keyed by bibkey (`ISBN:<isbn>`). Only the
//! fields the catalog keeps are modelled; everything else is ignored.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::{Book, Isbn};

/// Top-level payload; `null` decodes as `None`.
pub(super) type BooksResponseDto = Option<HashMap<String, Option<BookDataDto>>>;

#[derive(Debug, Deserialize)]
pub(super) struct BookDataDto {
    pub(super) title: Option<String>,
    pub(super) authors: Option<Vec<AuthorDto>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorDto {
    pub(super) name: Option<String>,
}

impl BookDataDto {
    pub(super) fn into_book(self, isbn: Isbn) -> Book {
        let names = self
            .authors
            .unwrap_or_default()
            .into_iter()
            .filter_map(|author| author.name);
        Book::from_metadata(isbn, self.title, names)
    }
}
