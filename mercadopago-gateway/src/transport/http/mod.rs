//! HTTP transport implementation.
//!
//! This module provides HTTP/1.1 and HTTP/2 transport using reqwest.

use reqwest::Client;
use tracing::{debug, instrument};

use super::config::{HttpConfig, HttpVersion};
use crate::{
    error::{GatewayError, Result, TransportError},
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Validates header name and value for CRLF injection prevention.
///
/// Access tokens reach the `Authorization` header straight from inbound
/// requests, so they are checked before anything goes on the wire.
fn validate_header(name: &str, value: &str) -> std::result::Result<(), TransportError> {
    if name.contains('\r') || name.contains('\n') || name.contains('\0') {
        return Err(TransportError::InvalidRequest(
            "header name contains control characters".to_owned(),
        ));
    }
    if value.contains('\r') || value.contains('\n') || value.contains('\0') {
        return Err(TransportError::InvalidRequest(
            "header value contains control characters".to_owned(),
        ));
    }
    Ok(())
}

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Supports automatic connection pooling, keep-alive, and HTTP/2 multiplexing.
/// Cloning is cheap and shares the connection pool.
///
/// # Examples
///
/// ```rust,no_run
/// use mercadopago_gateway::transport::{HttpConfig, HttpTransport, HttpVersion};
///
/// # fn example() -> mercadopago_gateway::error::Result<()> {
/// let config = HttpConfig { http_version: HttpVersion::Http1, ..Default::default() };
/// let transport = HttpTransport::with_config(&config)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    http_version: HttpVersion,
}

impl HttpTransport {
    /// Creates a new HTTP transport with default settings.
    ///
    /// Uses [`HttpConfig::default`]: a 30 second call deadline, a 10 second
    /// connect deadline and ALPN protocol negotiation.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created (e.g. TLS backend failure).
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates HTTP transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the configuration is out of bounds and
    /// [`GatewayError::Transport`] if the HTTP client cannot be created.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout());

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Http2 => builder.http2_prior_knowledge(),
            HttpVersion::Auto => builder,
        };

        let client = builder.build().map_err(|e| GatewayError::Transport(e.into()))?;

        Ok(Self { client, http_version: config.http_version })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client, http_version: HttpVersion::Auto }
    }

    #[instrument(
        skip(self, request),
        fields(method = %request.method, host = request.url.host_str(), path = request.url.path())
    )]
    async fn execute_request(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        for (name, value) in &request.headers {
            validate_header(name, value)?;
        }

        let mut builder = self.client.request(request.method, request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_owned()))
            .collect();

        let body = response.bytes().await?.to_vec();

        debug!(status, body_len = body.len(), "response received");

        Ok(TransportResponse { status, body, headers })
    }
}

impl Transport for HttpTransport {
    async fn send<'a>(
        &'a self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        self.execute_request(request).await
    }

    fn protocol_name(&self) -> &'static str {
        self.http_version.protocol_name()
    }
}
