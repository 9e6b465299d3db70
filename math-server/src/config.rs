//! Server configuration from the process environment

use math_core::store::DEFAULT_DB_PATH;
use math_core::StoreConfig;
use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

/// Configuration errors detected at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `BIND_ADDRESS` is not a socket address
    #[error("Invalid BIND_ADDRESS '{value}': {source}")]
    InvalidBindAddress {
        /// The rejected value
        value: String,
        /// Parser error
        #[source]
        source: AddrParseError,
    },
}

/// Runtime settings for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`BIND_ADDRESS`)
    pub bind_address: SocketAddr,

    /// Operation store settings (`MATH_DB_PATH`)
    pub store: StoreConfig,

    /// Export traces over OTLP (`OTEL_ENABLED`)
    pub otel_enabled: bool,
}

impl ServerConfig {
    /// Read configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddress {
                value: bind.clone(),
                source,
            })?;

        let db_path = lookup("MATH_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let otel_enabled = lookup("OTEL_ENABLED")
            .and_then(|value| value.parse::<bool>().ok())
            .unwrap_or(false);

        Ok(Self {
            bind_address,
            store: StoreConfig::new(db_path),
            otel_enabled,
        })
    }
}
