//! Error mapping shared by the Diesel repository.

use tracing::debug;

use crate::domain::ports::BookRepositoryError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> BookRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            BookRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors.
///
/// Unique violations are reported as [`BookRepositoryError::DuplicateIsbn`]
/// for the ISBN being written; the database message is not parsed.
pub(crate) fn map_diesel_error(
    error: diesel::result::Error,
    isbn: Option<&str>,
) -> BookRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => BookRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => BookRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => match isbn {
            Some(isbn) => BookRepositoryError::duplicate_isbn(isbn),
            None => BookRepositoryError::query("unique constraint violated"),
        },
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            BookRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => BookRepositoryError::query("database error"),
        _ => BookRepositoryError::query("database error"),
    }
}
