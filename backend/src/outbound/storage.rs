//! Backing-store selection.
//!
//! Maps a [`StorageBackend`] choice onto a concrete `BookRepository`.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::outbound::json_file::JsonFileBookRepository;
use crate::outbound::memory::InMemoryBookRepository;
use crate::outbound::persistence::{
    DbPool, DieselBookRepository, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Pretty-printed JSON array at the given path.
    File(PathBuf),
    /// Process memory; lost on exit.
    Memory,
    /// PostgreSQL `books` table at the given database URL.
    Postgres(String),
}

/// Failures while opening a backing store.
#[derive(Debug, thiserror::Error)]
pub enum StorageSetupError {
    #[error(transparent)]
    File(#[from] BookRepositoryError),
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Open the repository for `backend`.
///
/// The PostgreSQL backend applies pending migrations before building the
/// pool.
pub async fn connect_book_repository(
    backend: &StorageBackend,
) -> Result<Arc<dyn BookRepository>, StorageSetupError> {
    match backend {
        StorageBackend::File(path) => {
            info!(path = %path.display(), "using JSON file catalog");
            Ok(Arc::new(JsonFileBookRepository::open(path)?))
        }
        StorageBackend::Memory => {
            info!("using in-memory catalog");
            Ok(Arc::new(InMemoryBookRepository::new()))
        }
        StorageBackend::Postgres(database_url) => {
            info!("using PostgreSQL catalog");
            run_pending_migrations(database_url).await?;
            let pool = DbPool::new(PoolConfig::new(database_url.as_str())).await?;
            Ok(Arc::new(DieselBookRepository::new(pool)))
        }
    }
}
