//! Backend entry-point: wires the catalog service, REST endpoints and OpenAPI docs.

mod server;

use std::env;
use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use catalog::config::CatalogSettings;
use catalog::domain::CatalogService;
use catalog::inbound::http::health::HealthState;
use catalog::inbound::http::state::HttpState;
use catalog::outbound::open_library::OpenLibraryHttpSource;
use catalog::outbound::storage::connect_book_repository;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CatalogSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let backend = settings
        .storage_backend(env::var("DATABASE_URL").ok())
        .map_err(io::Error::other)?;
    let endpoint = settings.metadata_endpoint().map_err(io::Error::other)?;
    let timeout = settings.metadata_timeout().map_err(io::Error::other)?;

    let books = connect_book_repository(&backend)
        .await
        .map_err(|e| io::Error::other(format!("failed to open catalog storage: {e}")))?;
    let metadata = OpenLibraryHttpSource::new(endpoint, timeout)
        .map_err(|e| io::Error::other(format!("failed to build metadata client: {e}")))?;
    let service = Arc::new(CatalogService::new(books, Arc::new(metadata)));

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, HttpState::from_service(service));
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "catalog server listening");
    server.await
}
