//! Error handling example showing how to branch on gateway error kinds.
//!
//! # Running this example
//!
//! ```bash
//! export MP_CLIENT_ID=<client id>
//! export MP_CLIENT_SECRET=<client secret>
//! cargo run --example error_handling
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println"
)]

use std::env;

use mercadopago_gateway::{
    Gateway, GatewayConfig, GatewayError, PaymentGateway, models::Credentials,
};

fn load_credentials() -> Result<Credentials, Box<dyn std::error::Error>> {
    let client_id = env::var("MP_CLIENT_ID").map_err(|_| "MP_CLIENT_ID is not set")?;
    let client_secret = env::var("MP_CLIENT_SECRET").map_err(|_| "MP_CLIENT_SECRET is not set")?;
    Ok(Credentials::new(client_id, client_secret))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Mercado Pago Gateway: Error Handling Example\n");

    let gateway = Gateway::with_http(&GatewayConfig::default())?;

    println!("Example 1: invalid credentials");
    match gateway.get_access_token(&Credentials::new("invalid", "invalid")).await {
        Ok(_) => println!("   Unexpected success"),
        Err(GatewayError::Remote(remote)) => {
            println!("   Remote error {}: {remote}", remote.status_code());
        }
        Err(e) => println!("   Other error: {e}"),
    }

    let token = gateway.get_access_token(&load_credentials()?).await?;

    println!("\nExample 2: unknown payment id");
    match gateway.get_payment(token.as_str(), "0").await {
        Ok(payment) => println!("   Found payment {} ({})", payment.id, payment.status),
        Err(GatewayError::Remote(remote)) if remote.status_code() == 404 => {
            println!("   Not found: {remote}");
        }
        Err(e) => println!("   Error: {e}"),
    }

    println!("\nExample 3: totals by status");
    for status in ["approved", "rejected", "pending"] {
        match gateway.get_total_payments(token.as_str(), status).await {
            Ok(total) => println!("   {status}: {total}"),
            Err(e) if e.is_transport() => eprintln!("   {status}: network failure: {e}"),
            Err(e) => eprintln!("   {status}: {e}"),
        }
    }

    Ok(())
}
