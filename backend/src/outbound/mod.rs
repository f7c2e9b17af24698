//! Outbound adapters implementing the domain's driven ports.
//!
//! - **open_library**: reqwest-backed `BookMetadataSource`
//! - **json_file**: JSON file `BookRepository`
//! - **memory**: in-memory `BookRepository`
//! - **persistence**: PostgreSQL `BookRepository` using Diesel ORM
//! - **storage**: picks one of the repositories at start-up
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business logic.

pub mod json_file;
pub mod memory;
pub mod open_library;
pub mod persistence;
pub mod storage;
