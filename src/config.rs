//! Configuration Module
//!
//! Handles loading and validating server configuration from environment
//! variables. The container and namespace identify external resources, so
//! they have no sensible defaults and are required at startup.

use std::env;

use thiserror::Error;

/// Error raised when required configuration is absent or unparsable.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),

    #[error("environment variable {0} has invalid value: {1}")]
    Invalid(&'static str, String),
}

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Blob container identifier
    pub data_container: String,
    /// Application namespace used to derive gate names
    pub namespace: String,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_CONTAINER` - Blob container identifier (required)
    /// - `APP_NAME` - Namespace for gate names (required)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_container =
            env::var("DATA_CONTAINER").map_err(|_| ConfigError::Missing("DATA_CONTAINER"))?;
        let namespace = env::var("APP_NAME").map_err(|_| ConfigError::Missing("APP_NAME"))?;

        let server_port = match env::var("SERVER_PORT") {
            Ok(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("SERVER_PORT", v))?,
            Err(_) => 3000,
        };
        let sweep_interval = match env::var("SWEEP_INTERVAL") {
            Ok(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("SWEEP_INTERVAL", v))?,
            Err(_) => 60,
        };

        Ok(Self {
            data_container,
            namespace,
            server_port,
            sweep_interval,
        })
    }
}
