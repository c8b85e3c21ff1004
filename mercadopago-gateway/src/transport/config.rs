//! Settings for the reqwest client behind [`HttpTransport`](super::HttpTransport).
//!
//! The gateway never enforces a deadline of its own, so every timeout a call
//! can hit is configured here. The section lives under `[gateway.http]` in
//! the server configuration:
//!
//! ```toml
//! [gateway.http]
//! timeout_secs = 20
//! connect_timeout_secs = 5
//! pool_idle_timeout_secs = 60
//! http_version = "http1"
//! user_agent = "my-shop/1.0"
//! ```
//!
//! Unknown keys are rejected so a misspelled timeout does not silently fall
//! back to its default.

use std::{ops::RangeInclusive, time::Duration};

use serde::Deserialize;

use crate::error::{GatewayError, Result};

/// Accepted whole-request timeouts, in seconds.
pub const TIMEOUT_SECS_RANGE: RangeInclusive<u64> = 1..=300;

/// Accepted connect timeouts, in seconds.
pub const CONNECT_TIMEOUT_SECS_RANGE: RangeInclusive<u64> = 1..=60;

/// `User-Agent` sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("mercadopago-gateway/", env!("CARGO_PKG_VERSION"));

/// reqwest client settings used to reach Mercado Pago.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Deadline for one whole call, from connect to the last body byte.
    pub timeout_secs: u64,
    /// Deadline for establishing the TCP and TLS connection.
    pub connect_timeout_secs: u64,
    /// Idle keep-alive connections kept per host.
    pub pool_max_idle_per_host: usize,
    /// How long an idle pooled connection survives. `0` keeps it until the
    /// remote closes it.
    pub pool_idle_timeout_secs: u64,
    /// Protocol negotiation with the API host.
    pub http_version: HttpVersion,
    /// `User-Agent` header sent on every call.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            pool_max_idle_per_host: 32,
            pool_idle_timeout_secs: 90,
            http_version: HttpVersion::Auto,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpConfig {
    /// Checks the settings before a client is built from them.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] when a timeout falls outside
    /// [`TIMEOUT_SECS_RANGE`] or [`CONNECT_TIMEOUT_SECS_RANGE`], when the
    /// connect timeout exceeds the whole-call timeout, or when `user_agent`
    /// is blank or carries control characters.
    pub fn validate(&self) -> Result<()> {
        within("timeout_secs", self.timeout_secs, &TIMEOUT_SECS_RANGE)?;
        within("connect_timeout_secs", self.connect_timeout_secs, &CONNECT_TIMEOUT_SECS_RANGE)?;

        if self.connect_timeout_secs > self.timeout_secs {
            return Err(GatewayError::Config(format!(
                "connect_timeout_secs ({}) cannot exceed timeout_secs ({})",
                self.connect_timeout_secs, self.timeout_secs
            )));
        }

        if self.user_agent.trim().is_empty() || self.user_agent.chars().any(char::is_control) {
            return Err(GatewayError::Config(
                "user_agent must be non-empty printable text".to_owned(),
            ));
        }

        Ok(())
    }

    /// Whole-call deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connection deadline.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Idle lifetime of pooled connections, `None` when unbounded.
    #[must_use]
    pub const fn pool_idle_timeout(&self) -> Option<Duration> {
        match self.pool_idle_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn within(key: &str, value: u64, range: &RangeInclusive<u64>) -> Result<()> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(GatewayError::Config(format!(
        "{key} must be between {} and {}, got {value}",
        range.start(),
        range.end()
    )))
}

/// Protocol used to talk to the API host.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HttpVersion {
    /// HTTP/1.1 only.
    Http1,
    /// HTTP/2 with prior knowledge, no upgrade.
    Http2,
    /// Let ALPN pick during the TLS handshake.
    #[default]
    Auto,
}

impl HttpVersion {
    /// Name reported by [`Transport::protocol_name`](super::Transport::protocol_name).
    #[must_use]
    pub const fn protocol_name(self) -> &'static str {
        match self {
            Self::Http1 => "http/1.1",
            Self::Http2 => "http/2",
            Self::Auto => "http",
        }
    }
}
