//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Catalog records, one row per ISBN.
    books (id) {
        /// Serial primary key; defines storage order.
        id -> Int4,
        title -> Varchar,
        author -> Varchar,
        /// Unique catalog key.
        isbn -> Varchar,
    }
}
