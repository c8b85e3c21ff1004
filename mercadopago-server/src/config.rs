//! Server configuration.
//!
//! Read from the TOML file named by `MERCADOPAGO_CONFIG`; built-in defaults
//! apply when the variable is unset.
//!
//! ```toml
//! bind_addr = "0.0.0.0:8080"
//!
//! [gateway]
//! base_url = "https://api.mercadopago.com"
//!
//! [gateway.http]
//! timeout_secs = 20
//!
//! [validation]
//! require_payer_phone = true
//! ```

use std::{net::SocketAddr, path::Path};

use mercadopago_gateway::{GatewayConfig, GatewayError, handler::ValidationRules};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the config file path.
pub const CONFIG_ENV: &str = "MERCADOPAGO_CONFIG";

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configuration file is unreadable or malformed.
    #[error("invalid server configuration: {0}")]
    Config(String),

    /// The gateway could not be built from its configuration.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Binding or serving the listener failed.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Root server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Mercado Pago gateway settings.
    pub gateway: GatewayConfig,
    /// Checkout preference validation rules.
    pub validation: ValidationRules,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            gateway: GatewayConfig::default(),
            validation: ValidationRules::default(),
        }
    }
}

impl ServerConfig {
    /// Loads the file named by `MERCADOPAGO_CONFIG`, or the defaults if unset.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if the file cannot be read or is invalid.
    pub fn load() -> Result<Self, ServerError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(path),
            None => {
                let config = Self::default();
                config.gateway.validate()?;
                Ok(config)
            }
        }
    }

    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if the file cannot be read or is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] on malformed TOML and
    /// [`ServerError::Gateway`] if the gateway section is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self, ServerError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ServerError::Config(e.to_string()))?;
        config.gateway.validate()?;
        Ok(config)
    }
}
