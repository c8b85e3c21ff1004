//! Gateway configuration.
//!
//! # Examples
//!
//! ```toml
//! base_url = "https://api.mercadopago.com"
//!
//! [http]
//! timeout_secs = 15
//! http_version = "http1"
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::endpoint::DEFAULT_BASE_URL;
use crate::{
    error::{GatewayError, Result},
    transport::HttpConfig,
};

/// Root gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayConfig {
    /// Mercado Pago API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Settings for the reqwest transport.
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), http: HttpConfig::default() }
    }
}

impl GatewayConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the TOML is malformed or fails
    /// [`validate`](Self::validate).
    ///
    /// # Examples
    ///
    /// ```
    /// use mercadopago_gateway::gateway::GatewayConfig;
    ///
    /// let toml = r#"base_url = "https://api.mercadopago.com""#;
    /// let config = GatewayConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.http.timeout_secs, 30);
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| GatewayError::Config(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the file cannot be read or is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GatewayError::Config(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Checks the base URL and the transport bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the base URL does not parse, is not
    /// HTTPS, or the HTTP settings are out of bounds.
    pub fn validate(&self) -> Result<()> {
        self.parsed_base_url()?;
        self.http.validate()
    }

    /// Returns the base URL as a parsed, HTTPS-checked [`Url`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] on a malformed or non-HTTPS URL.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            GatewayError::Config(format!("invalid base_url '{}': {e}", self.base_url))
        })?;

        if url.scheme() != "https" {
            return Err(GatewayError::Config(format!(
                "base_url must use HTTPS, got: {}",
                url.scheme()
            )));
        }

        Ok(url)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}
