//! Server settings read from the environment.

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DOMAIN: &str = "localhost";
const DEFAULT_MEDIA_ROOT: &str = "media";
const DEFAULT_SALE_SWEEP_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {source}")]
    Invalid {
        name: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Cookie domain; sessions are shared with `.{domain}` subdomains.
    pub domain: String,
    /// Session key material; a random key is generated when absent.
    pub secret: Option<String>,
    pub auth_service_url: String,
    /// Directory served under `/products` and `/avatars`.
    pub media_root: PathBuf,
    pub sale_sweep_interval_secs: u64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_service_url = lookup("AUTH_SERVICE_URL")
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing("AUTH_SERVICE_URL"))?;

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|source| ConfigError::Invalid {
                    name: "PORT",
                    source,
                })?,
            None => DEFAULT_PORT,
        };

        let sale_sweep_interval_secs = match lookup("SALE_SWEEP_INTERVAL_SECS") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|source| ConfigError::Invalid {
                    name: "SALE_SWEEP_INTERVAL_SECS",
                    source,
                })?,
            None => DEFAULT_SALE_SWEEP_INTERVAL_SECS,
        };
        if sale_sweep_interval_secs == 0 {
            return Err(ConfigError::Zero("SALE_SWEEP_INTERVAL_SECS"));
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            address: lookup("ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            port,
            domain: lookup("DOMAIN").unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            secret: lookup("SECRET_KEY").filter(|value| !value.is_empty()),
            auth_service_url,
            media_root: lookup("MEDIA_ROOT")
                .unwrap_or_else(|| DEFAULT_MEDIA_ROOT.to_string())
                .into(),
            sale_sweep_interval_secs,
        })
    }
}
