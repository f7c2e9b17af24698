//! Interactive console for the library catalog.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use catalog::config::CatalogSettings;
use catalog::domain::CatalogService;
use catalog::inbound::console::ConsoleMenu;
use catalog::outbound::open_library::OpenLibraryHttpSource;
use catalog::outbound::storage::connect_book_repository;
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

/// `catalog-cli` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "catalog-cli",
    about = "Manage the library catalog from an interactive menu",
    version
)]
struct CliArgs {
    /// Backing store: `file`, `memory` or `postgres`.
    #[arg(long, value_name = "kind", default_value = "file")]
    storage: String,
    /// Catalog file used by the `file` store.
    #[arg(long = "library-file", value_name = "path")]
    library_file: Option<PathBuf>,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Books API endpoint of the metadata source.
    #[arg(long = "metadata-endpoint", value_name = "url")]
    metadata_endpoint: Option<String>,
    /// Metadata request timeout in seconds.
    #[arg(long = "metadata-timeout-secs", value_name = "secs", default_value_t = 10)]
    metadata_timeout_secs: u64,
}

impl From<CliArgs> for CatalogSettings {
    fn from(args: CliArgs) -> Self {
        Self {
            bind_addr: None,
            storage: Some(args.storage),
            library_file: args.library_file,
            database_url: args.database_url,
            metadata_endpoint: args.metadata_endpoint,
            metadata_timeout_secs: args.metadata_timeout_secs,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    // Logs go to stderr so they do not interleave with the menu.
    let _init_result = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .with_writer(io::stderr)
        .try_init();

    let settings = CatalogSettings::from(CliArgs::parse());
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build console runtime")?;
    runtime.block_on(run(settings))
}

async fn run(settings: CatalogSettings) -> Result<()> {
    let backend = settings.storage_backend(env::var("DATABASE_URL").ok())?;
    let books = connect_book_repository(&backend)
        .await
        .wrap_err("failed to open catalog storage")?;
    let metadata =
        OpenLibraryHttpSource::new(settings.metadata_endpoint()?, settings.metadata_timeout()?)
            .wrap_err("failed to build metadata client")?;
    let service = Arc::new(CatalogService::new(books, Arc::new(metadata)));

    let menu = ConsoleMenu::new(service.clone(), service);
    menu.run(io::stdin().lock(), io::stdout().lock())
        .await
        .wrap_err("console I/O failed")
}
