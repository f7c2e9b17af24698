//! Open Library outbound adapter.
//!
//! A thin HTTP implementation of the `BookMetadataSource` port backed by the
//! Open Library books API.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_METADATA_ENDPOINT, OpenLibraryHttpSource};
