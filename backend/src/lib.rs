//! Library catalog: resolve ISBNs through Open Library and keep the
//! resulting records in a JSON file, memory or PostgreSQL.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
