//! Mercado Pago REST gateway.
//!
//! [`Gateway`] turns each operation into exactly one [`TransportRequest`] and
//! classifies what comes back:
//!
//! - the transport failed: [`GatewayError::Transport`], unchanged
//! - the remote answered with status >= 400: [`GatewayError::Remote`] carrying
//!   the raw body and the status code
//! - a success body did not match the expected shape: [`GatewayError::Decode`]
//!
//! Nothing is retried and nothing is cached. Callers depend on the
//! [`PaymentGateway`] trait so the controller can be tested without a network.

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    error::{GatewayError, RemoteError, Result},
    models::{AccessToken, Credentials, Payment, PaymentSearchResult, Preference, PreferenceResult},
    transport::{HttpTransport, Transport, TransportRequest, TransportResponse},
};

pub mod config;
pub mod endpoint;

pub use config::GatewayConfig;
pub use endpoint::{DEFAULT_BASE_URL, Endpoints};

/// Operations offered by the Mercado Pago API.
///
/// Implemented by [`Gateway`]; substitute a fake in tests of upper layers.
pub trait PaymentGateway: Send + Sync {
    /// Exchanges client credentials for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] per the classification in the module docs.
    fn get_access_token<'a>(
        &'a self,
        credentials: &'a Credentials,
    ) -> impl Future<Output = Result<AccessToken>> + Send + 'a;

    /// Creates a checkout preference and returns its id and checkout URL.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Encode`] if the preference cannot be serialized,
    /// otherwise per the classification in the module docs.
    fn create_preference<'a>(
        &'a self,
        access_token: &'a str,
        preference: &'a Preference,
    ) -> impl Future<Output = Result<PreferenceResult>> + Send + 'a;

    /// Returns the total amount of an existing checkout preference.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] per the classification in the module docs.
    fn get_checkout_preference<'a>(
        &'a self,
        access_token: &'a str,
        id: &'a str,
    ) -> impl Future<Output = Result<i64>> + Send + 'a;

    /// Fetches a single payment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] per the classification in the module docs.
    fn get_payment<'a>(
        &'a self,
        access_token: &'a str,
        id: &'a str,
    ) -> impl Future<Output = Result<Payment>> + Send + 'a;

    /// Lists payments carrying an external reference, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] per the classification in the module docs.
    fn get_payment_search<'a>(
        &'a self,
        access_token: &'a str,
        external_reference: &'a str,
    ) -> impl Future<Output = Result<PaymentSearchResult>> + Send + 'a;

    /// Counts payments in the given status.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] per the classification in the module docs.
    fn get_total_payments<'a>(
        &'a self,
        access_token: &'a str,
        status: &'a str,
    ) -> impl Future<Output = Result<u64>> + Send + 'a;
}

/// Mercado Pago client over an injected [`Transport`].
///
/// The transport is shared, never owned: several gateways (or other
/// components) may hold the same `Arc`.
///
/// # Examples
///
/// ```rust,no_run
/// use mercadopago_gateway::{
///     gateway::{Gateway, GatewayConfig, PaymentGateway},
///     models::Credentials,
/// };
///
/// # async fn example() -> mercadopago_gateway::error::Result<()> {
/// let gateway = Gateway::with_http(&GatewayConfig::default())?;
/// let token = gateway.get_access_token(&Credentials::new("client", "secret")).await?;
/// let total = gateway.get_total_payments(token.as_str(), "approved").await?;
/// println!("{total} approved payments");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Gateway<T> {
    transport: Arc<T>,
    endpoints: Endpoints,
}

impl<T: Transport> Gateway<T> {
    /// Creates a gateway that sends requests under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidInput`] if `base_url` cannot carry a path.
    pub fn new(transport: Arc<T>, base_url: Url) -> Result<Self> {
        Ok(Self { transport, endpoints: Endpoints::new(base_url)? })
    }

    /// Creates a gateway from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the configuration is invalid.
    pub fn from_config(transport: Arc<T>, config: &GatewayConfig) -> Result<Self> {
        config.validate()?;
        Self::new(transport, config.parsed_base_url()?)
    }

    /// Returns the API root requests are sent under.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.endpoints.base_url()
    }

    /// Returns the shared transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        request: TransportRequest,
        context: &'static str,
    ) -> Result<R> {
        debug!(
            protocol = self.transport.protocol_name(),
            method = %request.method,
            path = request.url.path(),
            "sending request"
        );
        let response = self.transport.send(request).await?;
        decode_response(&response, context)
    }
}

impl Gateway<HttpTransport> {
    /// Creates a gateway backed by a reqwest [`HttpTransport`] built from `config.http`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the configuration is invalid, or
    /// [`GatewayError::Transport`] if the HTTP client cannot be built.
    pub fn with_http(config: &GatewayConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(&config.http)?;
        Self::from_config(Arc::new(transport), config)
    }
}

impl<T: Transport> PaymentGateway for Gateway<T> {
    #[instrument(skip(self, credentials), fields(client_id = %credentials.client_id))]
    async fn get_access_token<'a>(&'a self, credentials: &'a Credentials) -> Result<AccessToken> {
        let request = TransportRequest::post(self.endpoints.oauth_token(credentials)?);
        let response: TokenResponse = self.execute(request, "access token response").await?;
        Ok(response.access_token)
    }

    #[instrument(skip_all, fields(items = preference.items.len()))]
    async fn create_preference<'a>(
        &'a self,
        access_token: &'a str,
        preference: &'a Preference,
    ) -> Result<PreferenceResult> {
        let body = serde_json::to_vec(preference).map_err(GatewayError::Encode)?;
        let request = TransportRequest::post(self.endpoints.create_preference(access_token)?)
            .with_json_body(body);

        let response: CreatedPreference = self.execute(request, "preference response").await?;
        Ok(PreferenceResult { id: response.id, checkout_url: response.init_point })
    }

    #[instrument(skip(self, access_token))]
    async fn get_checkout_preference<'a>(
        &'a self,
        access_token: &'a str,
        id: &'a str,
    ) -> Result<i64> {
        let request = TransportRequest::get(self.endpoints.checkout_preference(id)?)
            .with_bearer_auth(access_token);
        let response: CheckoutPreference =
            self.execute(request, "checkout preference response").await?;
        Ok(response.total_amount)
    }

    #[instrument(skip(self, access_token))]
    async fn get_payment<'a>(&'a self, access_token: &'a str, id: &'a str) -> Result<Payment> {
        let request =
            TransportRequest::get(self.endpoints.payment(id)?).with_bearer_auth(access_token);
        self.execute(request, "payment response").await
    }

    #[instrument(skip(self, access_token))]
    async fn get_payment_search<'a>(
        &'a self,
        access_token: &'a str,
        external_reference: &'a str,
    ) -> Result<PaymentSearchResult> {
        let request = TransportRequest::get(self.endpoints.payment_search(external_reference)?)
            .with_bearer_auth(access_token);
        let result: PaymentSearchResult = self.execute(request, "payment search response").await?;
        debug!(results = result.len(), "payment search decoded");
        Ok(result)
    }

    #[instrument(skip(self, access_token))]
    async fn get_total_payments<'a>(
        &'a self,
        access_token: &'a str,
        status: &'a str,
    ) -> Result<u64> {
        let request = TransportRequest::get(self.endpoints.total_payments(access_token, status)?);
        let response: SearchPage = self.execute(request, "payment totals response").await?;
        Ok(response.paging.total)
    }
}

/// Classifies a transport response and decodes a success body.
fn decode_response<R: DeserializeOwned>(
    response: &TransportResponse,
    context: &'static str,
) -> Result<R> {
    if response.status >= 400 {
        warn!(status = response.status, context, "remote returned an error");
        return Err(RemoteError::new(response.body_text(), response.status).into());
    }

    serde_json::from_slice(&response.body).map_err(|source| {
        warn!(
            status = response.status,
            content_type = response.content_type().unwrap_or("none"),
            context,
            error = %source,
            "undecodable response body"
        );
        GatewayError::Decode { context, source }
    })
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: AccessToken,
}

// Only `init_point` is required; an absent `id` reads as empty.
#[derive(Debug, Deserialize)]
struct CreatedPreference {
    #[serde(default)]
    id: String,
    init_point: String,
}

#[derive(Debug, Deserialize)]
struct CheckoutPreference {
    total_amount: i64,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    paging: Paging,
}

#[derive(Debug, Deserialize)]
struct Paging {
    total: u64,
}
