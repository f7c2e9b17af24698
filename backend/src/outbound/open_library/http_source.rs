//! Reqwest-backed Open Library metadata adapter.
//!
//! Owns transport details only: query construction, timeout, HTTP error
//! classification and JSON decoding into a [`Book`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::BooksResponseDto;
use crate::domain::ports::{BookMetadataSource, BookMetadataSourceError};
use crate::domain::{Book, Isbn};

/// Public Open Library books endpoint.
pub const DEFAULT_METADATA_ENDPOINT: &str = "https://openlibrary.org/api/books";

const USER_AGENT: &str = concat!("catalog/", env!("CARGO_PKG_VERSION"));

/// Metadata source issuing one GET per lookup against a single endpoint.
pub struct OpenLibraryHttpSource {
    client: Client,
    endpoint: Url,
}

impl OpenLibraryHttpSource {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Endpoint queried by this adapter.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl BookMetadataSource for OpenLibraryHttpSource {
    async fn resolve(&self, isbn: &Isbn) -> Result<Book, BookMetadataSourceError> {
        let bibkey = isbn.bibkey();
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("bibkeys", bibkey.as_str()),
                ("format", "json"),
                ("jscmd", "data"),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, body.as_ref());
            warn!(%isbn, %error, "metadata lookup rejected");
            return Err(error);
        }

        let book = parse_book(isbn, body.as_ref())?;
        debug!(%isbn, title = %book.title, "metadata lookup resolved");
        Ok(book)
    }
}

fn parse_book(isbn: &Isbn, body: &[u8]) -> Result<Book, BookMetadataSourceError> {
    let decoded: BooksResponseDto = serde_json::from_slice(body).map_err(|error| {
        BookMetadataSourceError::unreachable(format!("invalid Open Library payload: {error}"))
    })?;
    decoded
        .and_then(|mut entries| entries.remove(&isbn.bibkey()))
        .flatten()
        .map(|data| data.into_book(isbn.clone()))
        .ok_or_else(|| {
            debug!(%isbn, "metadata lookup found no entry");
            BookMetadataSourceError::not_found(isbn.as_str())
        })
}

fn map_transport_error(error: reqwest::Error) -> BookMetadataSourceError {
    if error.is_timeout() {
        BookMetadataSourceError::unreachable(format!("request timed out: {error}"))
    } else {
        BookMetadataSourceError::unreachable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> BookMetadataSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };
    BookMetadataSourceError::unreachable(message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
