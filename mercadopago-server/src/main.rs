//! Mercado Pago Server - HTTP front end for the Mercado Pago gateway
//!
//! Serves the checkout and payment operations of `mercadopago-gateway` over
//! HTTP. Configuration comes from the TOML file named by `MERCADOPAGO_CONFIG`.

#![allow(clippy::multiple_crate_versions, reason = "transitive dependencies from axum and reqwest")]

mod config;
mod observability;
mod routes;

use mercadopago_gateway::{Controller, Gateway, Handler, handler::RuleValidator};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    config::{ServerConfig, ServerError},
    observability::{LogFormat, init_observability},
};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    init_observability(LogFormat::from_env());

    let config = ServerConfig::load()?;
    let gateway = Gateway::with_http(&config.gateway)?;
    info!(base_url = %gateway.base_url(), "gateway configured");

    let handler = Handler::new(Controller::new(gateway), RuleValidator::new(config.validation));
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, routes::router(handler)).with_graceful_shutdown(shutdown_signal()).await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
