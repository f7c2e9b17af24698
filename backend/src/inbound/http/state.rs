//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be tested with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{CatalogCommand, CatalogQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalog: Arc<dyn CatalogCommand>,
    pub catalog_query: Arc<dyn CatalogQuery>,
}

impl HttpState {
    pub fn new(catalog: Arc<dyn CatalogCommand>, catalog_query: Arc<dyn CatalogQuery>) -> Self {
        Self {
            catalog,
            catalog_query,
        }
    }

    /// Build state from one value implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: CatalogCommand + CatalogQuery + 'static,
    {
        Self {
            catalog: service.clone(),
            catalog_query: service,
        }
    }
}
