//! Error types for the Mercado Pago gateway.
//!
//! This module defines every failure a gateway operation can surface.
//! All errors implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Transport Errors** ([`GatewayError::Transport`]): the request never produced a response
//! - **Remote Errors** ([`GatewayError::Remote`]): Mercado Pago answered with status >= 400
//! - **Decode Errors** ([`GatewayError::Decode`]): a success response had an unexpected shape
//! - **Input Errors** ([`GatewayError::Encode`], [`GatewayError::InvalidInput`]): the outbound
//!   request could not be built
//!
//! # Examples
//!
//! ```
//! use mercadopago_gateway::error::{GatewayError, RemoteError};
//!
//! let err = GatewayError::from(RemoteError::new(r#"{"message":"invalid token"}"#, 401));
//! assert_eq!(err.to_string(), r#"{"message":"invalid token"}"#);
//! assert_eq!(err.remote().map(RemoteError::status_code), Some(401));
//! ```

use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failure reported by Mercado Pago itself.
///
/// Built only when the remote response carries a status code >= 400. The
/// display text is the raw response body, byte for byte, so callers can show
/// the remote explanation without re-parsing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{raw_body}")]
pub struct RemoteError {
    raw_body: String,
    status_code: u16,
}

impl RemoteError {
    /// Creates a remote error from the response body and status code.
    pub fn new(raw_body: impl Into<String>, status_code: u16) -> Self {
        Self { raw_body: raw_body.into(), status_code }
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// Returns the HTTP status code of the remote response.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }
}

/// Failure of the underlying HTTP exchange.
///
/// Any [`Transport`](crate::transport::Transport) implementation reports its
/// failures through this type. The gateway forwards it untouched.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The reqwest client failed (DNS, connection, TLS, timeout, body read).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The transport refused to send the request.
    ///
    /// Raised for header names or values containing control characters and
    /// for methods the transport does not support.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Failure reported by a custom transport implementation.
    #[error("{0}")]
    Other(String),
}

/// Errors that can occur in gateway operations.
///
/// The variants are the error kinds upper layers branch on. Only
/// [`Remote`](Self::Remote) carries an HTTP status code of its own; a handler
/// maps every other kind to a generic server error.
///
/// This type implements `#[must_use]` to ensure errors are not silently ignored.
#[must_use = "errors should be handled or propagated"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The HTTP exchange did not complete.
    ///
    /// # Recovery
    ///
    /// Check network reachability and the transport timeouts. The gateway
    /// never retries on its own.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Mercado Pago answered with a status code >= 400.
    ///
    /// The message is the literal response body.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A success response could not be decoded into the expected shape.
    ///
    /// This is distinct from [`Remote`](Self::Remote): the remote did not
    /// declare a failure, it returned something this crate does not understand.
    #[error("failed to decode {context}: {source}")]
    Decode {
        /// The response shape that was expected.
        context: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The outbound payload could not be serialized.
    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request URL could not be built from the configured base URL.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Gateway or transport configuration is invalid.
    ///
    /// # Recovery
    ///
    /// Fix the configuration file; nothing was sent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// Returns the remote error if this is a [`GatewayError::Remote`].
    #[must_use]
    pub const fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the failure happened before a response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true if the response body had an unexpected shape.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
