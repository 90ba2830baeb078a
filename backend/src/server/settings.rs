//! Process settings loaded via OrthoConfig.
//!
//! Values come from `ARENA_*` environment variables, configuration files and
//! CLI flags, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use arena_backend::inbound::http::state::{Environment, UnknownEnvironment};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Settings controlling how the HTTP server starts.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ARENA")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; required in production, optional in development where
    /// the server falls back to in-memory stores.
    pub database_url: Option<String>,
    /// `development` or `production`.
    pub environment: Option<String>,
    /// Upper bound for pooled database connections.
    pub db_max_connections: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    Environment(#[from] UnknownEnvironment),
    #[error("ARENA_DATABASE_URL must be set when running in {environment}")]
    MissingDatabaseUrl { environment: Environment },
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn environment(&self) -> Result<Environment, SettingsError> {
        self.environment
            .as_deref()
            .map_or(Ok(Environment::default()), str::parse)
            .map_err(SettingsError::from)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Database URL checked against the deployment environment.
    ///
    /// Production refuses to start without persistence; development may run
    /// on the in-memory fixture stores.
    pub fn database_url_for(
        &self,
        environment: Environment,
    ) -> Result<Option<&str>, SettingsError> {
        match (self.database_url(), environment) {
            (None, Environment::Production) => {
                Err(SettingsError::MissingDatabaseUrl { environment })
            }
            (url, _) => Ok(url),
        }
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
            .max(1)
    }
}
