//! Mercado Pago Gateway: typed access to the Mercado Pago REST API
//!
//! A small library for the payment flows a merchant backend needs: obtaining
//! an access token, creating checkout preferences, and reading payments back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │    Handler      │  validates request parts, maps errors to status codes
//! └────────┬────────┘
//!          │ PaymentService
//! ┌────────▼────────┐
//! │   Controller    │  domain verbs, pure delegation
//! └────────┬────────┘
//!          │ PaymentGateway
//! ┌────────▼────────┐
//! │    Gateway      │  endpoints, payloads, error classification
//! └────────┬────────┘
//!          │ Transport (shared via Arc)
//! ┌────────▼────────┐
//! │  HttpTransport  │  reqwest: pooling, timeouts, TLS
//! └─────────────────┘
//! ```
//!
//! Each layer depends on a trait of the layer below, so every layer can be
//! tested against a fake.
//!
//! # Errors
//!
//! Every fallible operation returns [`GatewayError`]. A non-success answer from
//! Mercado Pago becomes [`GatewayError::Remote`], whose message is the raw
//! response body and whose status code is preserved:
//!
//! ```rust,no_run
//! use mercadopago_gateway::{
//!     GatewayError,
//!     gateway::{Gateway, GatewayConfig, PaymentGateway},
//! };
//!
//! # async fn example() -> mercadopago_gateway::Result<()> {
//! let gateway = Gateway::with_http(&GatewayConfig::default())?;
//!
//! match gateway.get_payment("APP_USR-token", "20359978").await {
//!     Ok(payment) => println!("payment is {}", payment.status),
//!     Err(GatewayError::Remote(remote)) => {
//!         println!("Mercado Pago answered {}: {remote}", remote.status_code());
//!     }
//!     Err(other) => return Err(other),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mercadopago_gateway::{
//!     controller::Controller,
//!     gateway::{Gateway, GatewayConfig},
//!     handler::{Handler, RuleValidator, ValidationRules},
//!     transport::HttpTransport,
//! };
//!
//! # async fn example() -> mercadopago_gateway::Result<()> {
//! let config = GatewayConfig::from_file("mercadopago.toml")?;
//! let transport = Arc::new(HttpTransport::with_config(&config.http)?);
//! let gateway = Gateway::from_config(transport, &config)?;
//!
//! let handler = Handler::new(
//!     Controller::new(gateway),
//!     RuleValidator::new(ValidationRules::default()),
//! );
//!
//! let response = handler.get_total_payments(Some("APP_USR-token"), Some("approved")).await;
//! println!("{}: {}", response.status, response.body);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::multiple_crate_versions, reason = "transitive dependencies from reqwest")]

pub mod controller;
pub mod error;
pub mod gateway;
pub mod handler;
pub mod models;
pub mod transport;

pub use controller::Controller;
pub use error::{GatewayError, RemoteError, Result, TransportError};
pub use gateway::{Gateway, GatewayConfig, PaymentGateway};
pub use handler::{Handler, HandlerResponse, PaymentService};
