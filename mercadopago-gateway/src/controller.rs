//! Domain-facing facade over a [`PaymentGateway`].
//!
//! The controller adds no behavior of its own: it builds [`Credentials`] from
//! loose strings and forwards everything else untouched, errors included.

use crate::{
    error::Result,
    gateway::PaymentGateway,
    models::{AccessToken, Credentials, Payment, PaymentSearchResult, Preference, PreferenceResult},
};

/// Delegates payment operations to a gateway.
#[derive(Debug, Clone)]
pub struct Controller<G> {
    gateway: G,
}

impl<G: PaymentGateway> Controller<G> {
    /// Wraps a gateway.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Returns the wrapped gateway.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Obtains an access token for the given application credentials.
    ///
    /// # Errors
    ///
    /// Forwards the gateway error unchanged.
    pub async fn get_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessToken> {
        let credentials = Credentials::new(client_id, client_secret);
        self.gateway.get_access_token(&credentials).await
    }

    /// Creates a checkout preference.
    ///
    /// # Errors
    ///
    /// Forwards the gateway error unchanged.
    pub async fn create_preference(
        &self,
        access_token: &str,
        preference: &Preference,
    ) -> Result<PreferenceResult> {
        self.gateway.create_preference(access_token, preference).await
    }

    /// Returns the total amount of a checkout preference.
    ///
    /// # Errors
    ///
    /// Forwards the gateway error unchanged.
    pub async fn get_checkout_preference(&self, access_token: &str, id: &str) -> Result<i64> {
        self.gateway.get_checkout_preference(access_token, id).await
    }

    /// Fetches a payment.
    ///
    /// # Errors
    ///
    /// Forwards the gateway error unchanged.
    pub async fn get_payment(&self, access_token: &str, id: &str) -> Result<Payment> {
        self.gateway.get_payment(access_token, id).await
    }

    /// Lists payments for an external reference.
    ///
    /// # Errors
    ///
    /// Forwards the gateway error unchanged.
    pub async fn get_payment_search(
        &self,
        access_token: &str,
        external_reference: &str,
    ) -> Result<PaymentSearchResult> {
        self.gateway.get_payment_search(access_token, external_reference).await
    }

    /// Counts payments in a status.
    ///
    /// # Errors
    ///
    /// Forwards the gateway error unchanged.
    pub async fn get_total_payments(&self, access_token: &str, status: &str) -> Result<u64> {
        self.gateway.get_total_payments(access_token, status).await
    }
}
