//! Endpoint resolution for the Mercado Pago REST API.
//!
//! Every URL the gateway sends is built here. Path identifiers are pushed as
//! single percent-encoded segments and query values are form-encoded, so
//! caller input can never change the endpoint being called.

use url::Url;

use crate::{
    error::{GatewayError, Result},
    models::Credentials,
};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.mercadopago.com";

/// Resolves request URLs against a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: Url,
}

impl Endpoints {
    /// Creates a resolver rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidInput`] if the URL cannot carry path segments
    /// (e.g. `mailto:` or `data:` URLs).
    pub fn new(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidInput(format!(
                "base URL cannot be a base: {base_url}"
            )));
        }
        Ok(Self { base_url })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /oauth/token?client_id=..&client_secret=..&grant_type=client_credentials`
    pub fn oauth_token(&self, credentials: &Credentials) -> Result<Url> {
        let mut url = self.path(&["oauth", "token"])?;
        url.query_pairs_mut()
            .append_pair("client_id", &credentials.client_id)
            .append_pair("client_secret", &credentials.client_secret)
            .append_pair("grant_type", "client_credentials");
        Ok(url)
    }

    /// `POST /checkout/preferences?access_token=..`
    pub fn create_preference(&self, access_token: &str) -> Result<Url> {
        let mut url = self.path(&["checkout", "preferences"])?;
        url.query_pairs_mut().append_pair("access_token", access_token);
        Ok(url)
    }

    /// `GET /checkout/preferences/{id}`
    pub fn checkout_preference(&self, id: &str) -> Result<Url> {
        self.path(&["checkout", "preferences", id])
    }

    /// `GET /v1/payments/{id}`
    pub fn payment(&self, id: &str) -> Result<Url> {
        self.path(&["v1", "payments", id])
    }

    /// `GET /v1/payments/search?sort=date_created&criteria=desc&external_reference=..`
    pub fn payment_search(&self, external_reference: &str) -> Result<Url> {
        let mut url = self.path(&["v1", "payments", "search"])?;
        url.query_pairs_mut()
            .append_pair("sort", "date_created")
            .append_pair("criteria", "desc")
            .append_pair("external_reference", external_reference);
        Ok(url)
    }

    /// `GET /v1/payments/search?access_token=..&limit=1&offset=0&status=..`
    ///
    /// The token rides in the query string here, unlike the other reads.
    pub fn total_payments(&self, access_token: &str, status: &str) -> Result<Url> {
        let mut url = self.path(&["v1", "payments", "search"])?;
        url.query_pairs_mut()
            .append_pair("access_token", access_token)
            .append_pair("limit", "1")
            .append_pair("offset", "0")
            .append_pair("status", status);
        Ok(url)
    }

    fn path(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| {
                GatewayError::InvalidInput(format!("base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
