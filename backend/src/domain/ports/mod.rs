//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`BookRepository`, `BookMetadataSource`) are implemented by
//! outbound adapters. Driving ports (`CatalogCommand`, `CatalogQuery`) are
//! what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod book_metadata_source;
mod book_repository;
mod catalog_command;
mod catalog_query;

#[cfg(test)]
pub use book_metadata_source::MockBookMetadataSource;
pub use book_metadata_source::{BookMetadataSource, BookMetadataSourceError};
#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{BookRepository, BookRepositoryError};
#[cfg(test)]
pub use catalog_command::MockCatalogCommand;
pub use catalog_command::CatalogCommand;
#[cfg(test)]
pub use catalog_query::MockCatalogQuery;
pub use catalog_query::CatalogQuery;
