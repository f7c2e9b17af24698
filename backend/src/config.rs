//! Runtime settings for the catalog server, loaded via OrthoConfig.
//!
//! Most fields are optional; accessors apply defaults and validate values so
//! `main` can fail fast with a readable message.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::open_library::DEFAULT_METADATA_ENDPOINT;
use crate::outbound::storage::StorageBackend;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LIBRARY_FILE: &str = "library.json";
const DEFAULT_METADATA_TIMEOUT_SECS: u64 = 10;

/// Invalid or incomplete settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`")]
    InvalidBindAddr { value: String },
    #[error("unknown storage backend `{value}`; expected file, memory or postgres")]
    UnknownStorage { value: String },
    #[error("postgres storage requires CATALOG_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("invalid metadata endpoint `{value}`: {message}")]
    InvalidMetadataEndpoint { value: String, message: String },
    #[error("metadata timeout must be at least one second")]
    ZeroMetadataTimeout,
}

/// Server configuration. Environment variables use the `CATALOG_` prefix.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct CatalogSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Backing store: `file`, `memory` or `postgres`.
    pub storage: Option<String>,
    /// Catalog file used by the `file` backend.
    pub library_file: Option<PathBuf>,
    /// Database URL used by the `postgres` backend.
    pub database_url: Option<String>,
    /// Books API endpoint of the metadata source.
    pub metadata_endpoint: Option<String>,
    /// Metadata request timeout in seconds.
    #[ortho_config(default = 10)]
    pub metadata_timeout_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            bind_addr: None,
            storage: None,
            library_file: None,
            database_url: None,
            metadata_endpoint: None,
            metadata_timeout_secs: DEFAULT_METADATA_TIMEOUT_SECS,
        }
    }
}

impl CatalogSettings {
    /// Return the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Return the catalog file path, falling back to `library.json`.
    pub fn library_file(&self) -> &Path {
        self.library_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_LIBRARY_FILE))
    }

    /// Resolve the storage backend.
    ///
    /// `env_database_url` is the process-wide `DATABASE_URL`, consulted only
    /// when `database_url` is unset.
    pub fn storage_backend(
        &self,
        env_database_url: Option<String>,
    ) -> Result<StorageBackend, SettingsError> {
        let kind = self.storage.as_deref().map(str::trim).unwrap_or("file");
        match kind.to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File(self.library_file().to_path_buf())),
            "memory" => Ok(StorageBackend::Memory),
            "postgres" => self
                .database_url
                .clone()
                .or(env_database_url)
                .filter(|url| !url.trim().is_empty())
                .map(StorageBackend::Postgres)
                .ok_or(SettingsError::MissingDatabaseUrl),
            _ => Err(SettingsError::UnknownStorage {
                value: kind.to_owned(),
            }),
        }
    }

    /// Return the metadata endpoint, falling back to Open Library.
    pub fn metadata_endpoint(&self) -> Result<Url, SettingsError> {
        let raw = self
            .metadata_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_METADATA_ENDPOINT);
        Url::parse(raw).map_err(|err| SettingsError::InvalidMetadataEndpoint {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Return the metadata request timeout; zero is rejected.
    pub fn metadata_timeout(&self) -> Result<Duration, SettingsError> {
        match self.metadata_timeout_secs {
            0 => Err(SettingsError::ZeroMetadataTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for catalog settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "CATALOG_BIND_ADDR",
        "CATALOG_STORAGE",
        "CATALOG_LIBRARY_FILE",
        "CATALOG_DATABASE_URL",
        "CATALOG_METADATA_ENDPOINT",
        "CATALOG_METADATA_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> CatalogSettings {
        CatalogSettings::load_from_iter([OsString::from("catalog")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("socket address")
        );
        assert_eq!(
            settings.storage_backend(None).expect("default storage"),
            StorageBackend::File(PathBuf::from("library.json"))
        );
        assert_eq!(
            settings.metadata_endpoint().expect("default endpoint").as_str(),
            DEFAULT_METADATA_ENDPOINT
        );
        assert_eq!(
            settings.metadata_timeout(),
            Ok(Duration::from_secs(DEFAULT_METADATA_TIMEOUT_SECS))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CATALOG_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("CATALOG_STORAGE", Some("postgres".to_owned())),
            ("CATALOG_LIBRARY_FILE", None),
            (
                "CATALOG_DATABASE_URL",
                Some("postgres://catalog@localhost/catalog".to_owned()),
            ),
            (
                "CATALOG_METADATA_ENDPOINT",
                Some("http://127.0.0.1:9999/api/books".to_owned()),
            ),
            ("CATALOG_METADATA_TIMEOUT_SECS", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("socket address")
        );
        assert_eq!(
            settings.storage_backend(None).expect("postgres storage"),
            StorageBackend::Postgres("postgres://catalog@localhost/catalog".to_owned())
        );
        assert_eq!(
            settings.metadata_endpoint().expect("endpoint").port(),
            Some(9999)
        );
        assert_eq!(settings.metadata_timeout(), Ok(Duration::from_secs(3)));
    }

    #[rstest]
    fn zero_timeout_from_environment_is_rejected() {
        let mut vars = VARS.map(|name| (name, None::<String>));
        vars[5] = ("CATALOG_METADATA_TIMEOUT_SECS", Some("0".to_owned()));
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.metadata_timeout(),
            Err(SettingsError::ZeroMetadataTimeout)
        );
    }

    #[rstest]
    fn default_settings_match_loaded_defaults() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let loaded = load_from_empty_args();
        let built = CatalogSettings::default();
        assert_eq!(loaded.metadata_timeout(), built.metadata_timeout());
        assert_eq!(loaded.storage_backend(None), built.storage_backend(None));
        assert_eq!(loaded.bind_addr(), built.bind_addr());
    }

    #[rstest]
    fn postgres_falls_back_to_process_database_url() {
        let settings = CatalogSettings {
            storage: Some("postgres".to_owned()),
            ..CatalogSettings::default()
        };
        assert_eq!(
            settings.storage_backend(Some("postgres://fallback".to_owned())),
            Ok(StorageBackend::Postgres("postgres://fallback".to_owned()))
        );
        assert_eq!(
            settings.storage_backend(None),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    #[case("Memory", Ok(StorageBackend::Memory))]
    #[case(
        "sqlite",
        Err(SettingsError::UnknownStorage { value: "sqlite".to_owned() })
    )]
    fn storage_kind_is_parsed(
        #[case] kind: &str,
        #[case] expected: Result<StorageBackend, SettingsError>,
    ) {
        let settings = CatalogSettings {
            storage: Some(kind.to_owned()),
            ..CatalogSettings::default()
        };
        assert_eq!(settings.storage_backend(None), expected);
    }

    #[rstest]
    fn rejects_malformed_values() {
        let settings = CatalogSettings {
            bind_addr: Some("not-an-address".to_owned()),
            metadata_endpoint: Some("::nope".to_owned()),
            ..CatalogSettings::default()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
        assert!(matches!(
            settings.metadata_endpoint(),
            Err(SettingsError::InvalidMetadataEndpoint { .. })
        ));
    }
}
