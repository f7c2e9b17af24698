//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Connections come from a `bb8` pool via `diesel-async`. Row structs and
//! table definitions stay internal; only domain types cross the boundary.
//!
//! # Example
//!
//! ```ignore
//! use catalog::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/catalog")).await?;
//! let repo = DieselBookRepository::new(pool);
//! ```

mod diesel_book_repository;
mod diesel_helpers;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_book_repository::DieselBookRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
