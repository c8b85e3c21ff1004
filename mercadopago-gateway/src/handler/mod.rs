//! Framework-agnostic request handling.
//!
//! A [`Handler`] takes already-extracted request parts (query values, the
//! `access_token` header, the raw body), validates them, calls the
//! [`PaymentService`] and renders a [`HandlerResponse`]. Input is always
//! checked before the service is touched.
//!
//! Error mapping:
//!
//! | Error | Status |
//! |---|---|
//! | [`GatewayError::Remote`] | the remote status code, verbatim |
//! | any other [`GatewayError`] | 500 |
//!
//! The error text is always part of the body, prefixed by the operation
//! (e.g. `couldn't get access token: <remote body>`).

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::{fmt, str::FromStr};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    controller::Controller,
    error::{GatewayError, RemoteError, Result},
    gateway::PaymentGateway,
    models::{AccessToken, Payment, PaymentSearchResult, Preference, PreferenceResult},
};

pub mod validation;

pub use validation::{FieldError, RuleValidator, ValidationErrors, ValidationRules, Validator};

/// Operations the handler depends on.
///
/// Implemented by [`Controller`]; tests substitute a fake.
pub trait PaymentService: Send + Sync {
    /// See [`Controller::get_access_token`].
    fn get_access_token<'a>(
        &'a self,
        client_id: &'a str,
        client_secret: &'a str,
    ) -> impl Future<Output = Result<AccessToken>> + Send + 'a;

    /// See [`Controller::create_preference`].
    fn create_preference<'a>(
        &'a self,
        access_token: &'a str,
        preference: &'a Preference,
    ) -> impl Future<Output = Result<PreferenceResult>> + Send + 'a;

    /// See [`Controller::get_checkout_preference`].
    fn get_checkout_preference<'a>(
        &'a self,
        access_token: &'a str,
        id: &'a str,
    ) -> impl Future<Output = Result<i64>> + Send + 'a;

    /// See [`Controller::get_payment`].
    fn get_payment<'a>(
        &'a self,
        access_token: &'a str,
        id: &'a str,
    ) -> impl Future<Output = Result<Payment>> + Send + 'a;

    /// See [`Controller::get_payment_search`].
    fn get_payment_search<'a>(
        &'a self,
        access_token: &'a str,
        external_reference: &'a str,
    ) -> impl Future<Output = Result<PaymentSearchResult>> + Send + 'a;

    /// See [`Controller::get_total_payments`].
    fn get_total_payments<'a>(
        &'a self,
        access_token: &'a str,
        status: &'a str,
    ) -> impl Future<Output = Result<u64>> + Send + 'a;
}

impl<G: PaymentGateway> PaymentService for Controller<G> {
    async fn get_access_token<'a>(
        &'a self,
        client_id: &'a str,
        client_secret: &'a str,
    ) -> Result<AccessToken> {
        Controller::get_access_token(self, client_id, client_secret).await
    }

    async fn create_preference<'a>(
        &'a self,
        access_token: &'a str,
        preference: &'a Preference,
    ) -> Result<PreferenceResult> {
        Controller::create_preference(self, access_token, preference).await
    }

    async fn get_checkout_preference<'a>(
        &'a self,
        access_token: &'a str,
        id: &'a str,
    ) -> Result<i64> {
        Controller::get_checkout_preference(self, access_token, id).await
    }

    async fn get_payment<'a>(&'a self, access_token: &'a str, id: &'a str) -> Result<Payment> {
        Controller::get_payment(self, access_token, id).await
    }

    async fn get_payment_search<'a>(
        &'a self,
        access_token: &'a str,
        external_reference: &'a str,
    ) -> Result<PaymentSearchResult> {
        Controller::get_payment_search(self, access_token, external_reference).await
    }

    async fn get_total_payments<'a>(
        &'a self,
        access_token: &'a str,
        status: &'a str,
    ) -> Result<u64> {
        Controller::get_total_payments(self, access_token, status).await
    }
}

/// Body encoding of a [`HandlerResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// `text/plain; charset=utf-8`
    Text,
    /// `application/json`
    Json,
}

impl ContentType {
    /// Returns the MIME type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

/// Status code and body of a handled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
    /// Body encoding.
    pub content_type: ContentType,
}

impl HandlerResponse {
    /// Plain-text response.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into(), content_type: ContentType::Text }
    }

    fn ok(body: impl Into<String>) -> Self {
        Self::text(200, body)
    }

    fn json<T: Serialize>(value: &T, context: &str) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status: 200, body, content_type: ContentType::Json },
            Err(e) => Self::text(500, format!("{context}: {e}")),
        }
    }

    fn error(context: &str, err: &GatewayError) -> Self {
        let status = status_code_for(err);
        warn!(status, error = %err, "{context}");
        Self::text(status, format!("{context}: {err}"))
    }
}

/// Maps a gateway error to the HTTP status code the handler answers with.
///
/// Remote failures keep their status code; everything else is a 500.
#[must_use]
pub fn status_code_for(err: &GatewayError) -> u16 {
    err.remote().map_or(500, RemoteError::status_code)
}

/// Payment status accepted by the totals endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Payment approved.
    Approved,
    /// Payment rejected.
    Rejected,
    /// Payment awaiting completion.
    Pending,
}

impl PaymentStatus {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status outside the accepted set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status: got: {0}, want: approved, rejected or pending")]
pub struct InvalidStatus(pub String);

impl FromStr for PaymentStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "pending" => Ok(Self::Pending),
            other => Err(InvalidStatus(other.to_owned())),
        }
    }
}

/// Request handler over a [`PaymentService`] and a [`Validator`].
///
/// # Examples
///
/// ```
/// use mercadopago_gateway::{
///     controller::Controller,
///     handler::{Handler, RuleValidator},
/// };
/// # use mercadopago_gateway::{error::Result, gateway::PaymentGateway, models::*};
/// # #[derive(Debug)]
/// # struct Offline;
/// # impl PaymentGateway for Offline {
/// #     async fn get_access_token<'a>(&'a self, _: &'a Credentials) -> Result<AccessToken> {
/// #         unimplemented!()
/// #     }
/// #     async fn create_preference<'a>(
/// #         &'a self,
/// #         _: &'a str,
/// #         _: &'a Preference,
/// #     ) -> Result<PreferenceResult> {
/// #         unimplemented!()
/// #     }
/// #     async fn get_checkout_preference<'a>(&'a self, _: &'a str, _: &'a str) -> Result<i64> {
/// #         unimplemented!()
/// #     }
/// #     async fn get_payment<'a>(&'a self, _: &'a str, _: &'a str) -> Result<Payment> {
/// #         unimplemented!()
/// #     }
/// #     async fn get_payment_search<'a>(
/// #         &'a self,
/// #         _: &'a str,
/// #         _: &'a str,
/// #     ) -> Result<PaymentSearchResult> {
/// #         unimplemented!()
/// #     }
/// #     async fn get_total_payments<'a>(&'a self, _: &'a str, _: &'a str) -> Result<u64> {
/// #         unimplemented!()
/// #     }
/// # }
///
/// let handler = Handler::new(Controller::new(Offline), RuleValidator::default());
/// let response = handler.ping();
/// assert_eq!(response.status, 200);
/// assert_eq!(response.body, "pong");
/// ```
#[derive(Debug, Clone)]
pub struct Handler<S, V = RuleValidator> {
    service: S,
    validator: V,
}

impl<S: PaymentService, V: Validator> Handler<S, V> {
    /// Creates a handler.
    #[must_use]
    pub fn new(service: S, validator: V) -> Self {
        Self { service, validator }
    }

    /// Returns the wrapped service.
    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Liveness check.
    #[must_use]
    pub fn ping(&self) -> HandlerResponse {
        HandlerResponse::ok("pong")
    }

    /// Exchanges client credentials for an access token, returned as plain text.
    #[instrument(skip_all)]
    pub async fn get_access_token(
        &self,
        client_id: Option<&str>,
        client_secret: Option<&str>,
    ) -> HandlerResponse {
        let Some(client_id) = present(client_id) else {
            return HandlerResponse::text(400, "client id is required");
        };
        let Some(client_secret) = present(client_secret) else {
            return HandlerResponse::text(400, "client secret is required");
        };

        match self.service.get_access_token(client_id, client_secret).await {
            Ok(token) => {
                info!("access token issued");
                HandlerResponse::ok(token.into_inner())
            }
            Err(e) => HandlerResponse::error("couldn't get access token", &e),
        }
    }

    /// Decodes, validates and submits a checkout preference.
    ///
    /// The body is checked before the access token, so a malformed body is
    /// reported even when the token is missing.
    #[instrument(skip_all, fields(body_len = body.len()))]
    pub async fn create_preference(
        &self,
        access_token: Option<&str>,
        body: &[u8],
    ) -> HandlerResponse {
        let preference: Preference = match serde_json::from_slice(body) {
            Ok(preference) => preference,
            Err(e) => return HandlerResponse::text(422, format!("couldn't decode body: {e}")),
        };

        if let Err(e) = self.validator.validate(&preference) {
            debug!(errors = e.fields().len(), "preference rejected");
            return HandlerResponse::text(400, format!("validation error: {e}"));
        }

        let Some(access_token) = present(access_token) else {
            return unauthorized();
        };

        match self.service.create_preference(access_token, &preference).await {
            Ok(result) => {
                info!(preference_id = %result.id, "checkout created");
                HandlerResponse::json(&result, "couldn't encode checkout")
            }
            Err(e) => HandlerResponse::error("couldn't create checkout", &e),
        }
    }

    /// Returns the total amount of a checkout preference as plain text.
    #[instrument(skip(self, access_token))]
    pub async fn get_checkout_preference(
        &self,
        access_token: Option<&str>,
        id: Option<&str>,
    ) -> HandlerResponse {
        let Some(access_token) = present(access_token) else {
            return unauthorized();
        };
        let Some(id) = present(id) else {
            return HandlerResponse::text(400, "preference id is required");
        };

        match self.service.get_checkout_preference(access_token, id).await {
            Ok(total) => {
                info!(total, "checkout preference fetched");
                HandlerResponse::ok(format!("total amount: {total}"))
            }
            Err(e) => HandlerResponse::error("couldn't get checkout preference", &e),
        }
    }

    /// Returns a payment as JSON.
    #[instrument(skip(self, access_token))]
    pub async fn get_payment(
        &self,
        access_token: Option<&str>,
        id: Option<&str>,
    ) -> HandlerResponse {
        let Some(access_token) = present(access_token) else {
            return unauthorized();
        };
        let Some(id) = present(id) else {
            return HandlerResponse::text(400, "payment id is required");
        };

        match self.service.get_payment(access_token, id).await {
            Ok(payment) => {
                info!(status = %payment.status, "payment fetched");
                HandlerResponse::json(&payment, "couldn't encode payment")
            }
            Err(e) => HandlerResponse::error("couldn't get payment", &e),
        }
    }

    /// Returns the payments of an external reference as JSON.
    #[instrument(skip(self, access_token))]
    pub async fn get_payment_search(
        &self,
        access_token: Option<&str>,
        external_reference: Option<&str>,
    ) -> HandlerResponse {
        let Some(access_token) = present(access_token) else {
            return unauthorized();
        };
        let Some(external_reference) = present(external_reference) else {
            return HandlerResponse::text(400, "external reference is required");
        };

        match self.service.get_payment_search(access_token, external_reference).await {
            Ok(result) => {
                info!(results = result.len(), "payments searched");
                HandlerResponse::json(&result, "couldn't encode payments")
            }
            Err(e) => HandlerResponse::error("couldn't search payments", &e),
        }
    }

    /// Counts payments in a status, rendered as `total payments: N`.
    #[instrument(skip(self, access_token))]
    pub async fn get_total_payments(
        &self,
        access_token: Option<&str>,
        status: Option<&str>,
    ) -> HandlerResponse {
        let Some(access_token) = present(access_token) else {
            return unauthorized();
        };
        let Some(status) = present(status) else {
            return HandlerResponse::text(400, "status is required");
        };
        let status = match status.parse::<PaymentStatus>() {
            Ok(status) => status,
            Err(e) => return HandlerResponse::text(400, e.to_string()),
        };

        match self.service.get_total_payments(access_token, status.as_str()).await {
            Ok(total) => {
                info!(total, "payments counted");
                HandlerResponse::ok(format!("total payments: {total}"))
            }
            Err(e) => HandlerResponse::error("couldn't get total payments", &e),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn unauthorized() -> HandlerResponse {
    HandlerResponse::text(401, "access token is required")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{error::TransportError, models::PaymentSummary};

    #[derive(Debug, Clone, Copy)]
    enum Outcome {
        Ok,
        Remote(u16, &'static str),
        Transport(&'static str),
        Decode,
    }

    impl Outcome {
        fn into_result<T>(self, value: T) -> Result<T> {
            match self {
                Self::Ok => Ok(value),
                Self::Remote(status, body) => Err(RemoteError::new(body, status).into()),
                Self::Transport(message) => Err(TransportError::Other(message.to_owned()).into()),
                Self::Decode => Err(GatewayError::Decode {
                    context: "payment response",
                    source: serde_json::from_str::<u64>("\"x\"").unwrap_err(),
                }),
            }
        }
    }

    #[derive(Debug)]
    struct FakeService {
        outcome: Outcome,
        calls: Mutex<Vec<String>>,
    }

    impl FakeService {
        fn new(outcome: Outcome) -> Self {
            Self { outcome, calls: Mutex::new(Vec::new()) }
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PaymentService for FakeService {
        async fn get_access_token<'a>(
            &'a self,
            client_id: &'a str,
            client_secret: &'a str,
        ) -> Result<AccessToken> {
            self.record(format!("token {client_id} {client_secret}"));
            self.outcome.into_result(AccessToken::new("APP_USR-1234"))
        }

        async fn create_preference<'a>(
            &'a self,
            access_token: &'a str,
            preference: &'a Preference,
        ) -> Result<PreferenceResult> {
            self.record(format!("preference {access_token} {}", preference.items.len()));
            self.outcome.into_result(PreferenceResult {
                id: "123-abc".to_owned(),
                checkout_url: "https://www.mercadopago.com/checkout?pref_id=123-abc".to_owned(),
            })
        }

        async fn get_checkout_preference<'a>(
            &'a self,
            access_token: &'a str,
            id: &'a str,
        ) -> Result<i64> {
            self.record(format!("checkout {access_token} {id}"));
            self.outcome.into_result(1500)
        }

        async fn get_payment<'a>(&'a self, access_token: &'a str, id: &'a str) -> Result<Payment> {
            self.record(format!("payment {access_token} {id}"));
            let payment: Payment = serde_json::from_str(
                r#"{"id": 1, "collector_id": 2, "currency_id": "ARS", "payer": {},
                    "transaction_amount": 10.5, "status": "approved"}"#,
            )
            .unwrap();
            self.outcome.into_result(payment)
        }

        async fn get_payment_search<'a>(
            &'a self,
            access_token: &'a str,
            external_reference: &'a str,
        ) -> Result<PaymentSearchResult> {
            self.record(format!("search {access_token} {external_reference}"));
            self.outcome.into_result(PaymentSearchResult {
                results: vec![PaymentSummary {
                    id: 7,
                    external_reference: Some(external_reference.to_owned()),
                    collector_id: 2,
                    currency_id: "ARS".to_owned(),
                    payment_type_id: None,
                    payer: Default::default(),
                    status: "pending".to_owned(),
                }],
            })
        }

        async fn get_total_payments<'a>(
            &'a self,
            access_token: &'a str,
            status: &'a str,
        ) -> Result<u64> {
            self.record(format!("total {access_token} {status}"));
            self.outcome.into_result(100)
        }
    }

    fn handler(outcome: Outcome) -> Handler<FakeService> {
        Handler::new(FakeService::new(outcome), RuleValidator::default())
    }

    const VALID_BODY: &str = r#"{
        "external_reference": "order-1",
        "items": [{"title": "Mate", "quantity": 1, "unit_price": 19.99}],
        "payer": {"email": "buyer@example.com"}
    }"#;

    #[test]
    fn test_ping() {
        let response = handler(Outcome::Ok).ping();
        assert_eq!(response, HandlerResponse::text(200, "pong"));
    }

    #[tokio::test]
    async fn test_get_access_token_success() {
        let handler = handler(Outcome::Ok);
        let response = handler.get_access_token(Some("ABC123"), Some("123ABC")).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "APP_USR-1234");
        assert_eq!(response.content_type, ContentType::Text);
        assert_eq!(handler.service().calls(), ["token ABC123 123ABC"]);
    }

    #[tokio::test]
    async fn test_get_access_token_missing_inputs() {
        let handler = handler(Outcome::Ok);

        let response = handler.get_access_token(None, Some("secret")).await;
        assert_eq!(response, HandlerResponse::text(400, "client id is required"));

        let response = handler.get_access_token(Some(""), Some("secret")).await;
        assert_eq!(response, HandlerResponse::text(400, "client id is required"));

        let response = handler.get_access_token(Some("id"), None).await;
        assert_eq!(response, HandlerResponse::text(400, "client secret is required"));

        assert!(handler.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_access_token_remote_error_keeps_status_and_body() {
        let body = r#"{"message":"invalid client_id","status":400}"#;
        let response =
            handler(Outcome::Remote(400, body)).get_access_token(Some("a"), Some("b")).await;
        assert_eq!(response.status, 400);
        assert_eq!(response.body, format!("couldn't get access token: {body}"));
    }

    #[tokio::test]
    async fn test_create_preference_success() {
        let handler = handler(Outcome::Ok);
        let response = handler.create_preference(Some("TOKEN"), VALID_BODY.as_bytes()).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, ContentType::Json);

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["id"], "123-abc");
        assert_eq!(body["checkout_url"], "https://www.mercadopago.com/checkout?pref_id=123-abc");
        assert_eq!(handler.service().calls(), ["preference TOKEN 1"]);
    }

    #[tokio::test]
    async fn test_create_preference_undecodable_body() {
        let handler = handler(Outcome::Ok);
        let response = handler.create_preference(Some("TOKEN"), b"{not json").await;
        assert_eq!(response.status, 422);
        assert!(response.body.starts_with("couldn't decode body: "));

        let response = handler.create_preference(Some("TOKEN"), br#"{"items": "mate"}"#).await;
        assert_eq!(response.status, 422);
        assert!(handler.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_preference_validation_error() {
        let handler = handler(Outcome::Ok);
        let body = r#"{"items": [{"title": "", "quantity": 1, "unit_price": 10}],
            "payer": {"email": "a@b.c"}}"#;
        let response = handler.create_preference(Some("TOKEN"), body.as_bytes()).await;
        assert_eq!(
            response,
            HandlerResponse::text(400, "validation error: items[0].title: is required")
        );
        assert!(handler.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_preference_negative_quantity_is_validation_error() {
        let handler = handler(Outcome::Ok);
        let body = r#"{"items": [{"title": "Mate", "quantity": -1, "unit_price": 10}],
            "payer": {"email": "a@b.c"}}"#;
        let response = handler.create_preference(Some("TOKEN"), body.as_bytes()).await;
        assert_eq!(
            response,
            HandlerResponse::text(
                400,
                "validation error: items[0].quantity: must be greater than zero"
            )
        );
        assert!(handler.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_preference_missing_token() {
        let handler = handler(Outcome::Ok);
        let response = handler.create_preference(None, VALID_BODY.as_bytes()).await;
        assert_eq!(response, HandlerResponse::text(401, "access token is required"));
        assert!(handler.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_preference_transport_error_is_500() {
        let response = handler(Outcome::Transport("connection reset"))
            .create_preference(Some("TOKEN"), VALID_BODY.as_bytes())
            .await;
        assert_eq!(
            response,
            HandlerResponse::text(500, "couldn't create checkout: connection reset")
        );
    }

    #[tokio::test]
    async fn test_get_total_payments_success() {
        let handler = handler(Outcome::Ok);
        let response = handler.get_total_payments(Some("TOKEN"), Some("approved")).await;
        assert_eq!(response, HandlerResponse::text(200, "total payments: 100"));
        assert_eq!(handler.service().calls(), ["total TOKEN approved"]);
    }

    #[tokio::test]
    async fn test_get_total_payments_input_errors() {
        let handler = handler(Outcome::Ok);

        let response = handler.get_total_payments(None, Some("approved")).await;
        assert_eq!(response, HandlerResponse::text(401, "access token is required"));

        let response = handler.get_total_payments(Some("TOKEN"), None).await;
        assert_eq!(response, HandlerResponse::text(400, "status is required"));

        let response = handler.get_total_payments(Some("TOKEN"), Some("refunded")).await;
        assert_eq!(
            response,
            HandlerResponse::text(
                400,
                "invalid status: got: refunded, want: approved, rejected or pending"
            )
        );

        assert!(handler.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_every_accepted_status_reaches_the_service() {
        let handler = handler(Outcome::Ok);
        for status in ["approved", "rejected", "pending"] {
            let response = handler.get_total_payments(Some("T"), Some(status)).await;
            assert_eq!(response.status, 200);
        }
        assert_eq!(
            handler.service().calls(),
            ["total T approved", "total T rejected", "total T pending"]
        );
    }

    #[tokio::test]
    async fn test_get_total_payments_remote_error() {
        let response = handler(Outcome::Remote(401, "invalid token"))
            .get_total_payments(Some("TOKEN"), Some("pending"))
            .await;
        assert_eq!(
            response,
            HandlerResponse::text(401, "couldn't get total payments: invalid token")
        );
    }

    #[tokio::test]
    async fn test_get_checkout_preference() {
        let handler = handler(Outcome::Ok);
        let response = handler.get_checkout_preference(Some("TOKEN"), Some("123-abc")).await;
        assert_eq!(response, HandlerResponse::text(200, "total amount: 1500"));

        let response = handler.get_checkout_preference(Some("TOKEN"), None).await;
        assert_eq!(response, HandlerResponse::text(400, "preference id is required"));

        let response = handler.get_checkout_preference(None, Some("123-abc")).await;
        assert_eq!(response.status, 401);
        assert_eq!(handler.service().calls(), ["checkout TOKEN 123-abc"]);
    }

    #[tokio::test]
    async fn test_get_payment() {
        let handler = handler(Outcome::Ok);
        let response = handler.get_payment(Some("TOKEN"), Some("1")).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, ContentType::Json);
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["status"], "approved");

        let response = handler.get_payment(Some("TOKEN"), Some("")).await;
        assert_eq!(response, HandlerResponse::text(400, "payment id is required"));
    }

    #[tokio::test]
    async fn test_get_payment_decode_error_is_500() {
        let response = handler(Outcome::Decode).get_payment(Some("TOKEN"), Some("1")).await;
        assert_eq!(response.status, 500);
        assert!(
            response.body.starts_with("couldn't get payment: failed to decode payment response")
        );
    }

    #[tokio::test]
    async fn test_get_payment_search() {
        let handler = handler(Outcome::Ok);
        let response = handler.get_payment_search(Some("TOKEN"), Some("order-1")).await;
        assert_eq!(response.status, 200);
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["results"][0]["external_reference"], "order-1");

        let response = handler.get_payment_search(Some("TOKEN"), None).await;
        assert_eq!(response, HandlerResponse::text(400, "external reference is required"));
    }

    #[tokio::test]
    async fn test_get_payment_search_remote_not_found() {
        let response = handler(Outcome::Remote(404, "not found"))
            .get_payment_search(Some("TOKEN"), Some("order-1"))
            .await;
        assert_eq!(response, HandlerResponse::text(404, "couldn't search payments: not found"));
    }

    #[test]
    fn test_status_code_for() {
        let remote = GatewayError::from(RemoteError::new("", 503));
        assert_eq!(status_code_for(&remote), 503);

        let transport = GatewayError::from(TransportError::Other("x".to_owned()));
        assert_eq!(status_code_for(&transport), 500);

        assert_eq!(status_code_for(&GatewayError::InvalidInput("x".to_owned())), 500);
    }

    #[test]
    fn test_payment_status_parse() {
        assert_eq!("approved".parse::<PaymentStatus>().unwrap(), PaymentStatus::Approved);
        assert_eq!("rejected".parse::<PaymentStatus>().unwrap(), PaymentStatus::Rejected);
        assert_eq!("pending".parse::<PaymentStatus>().unwrap(), PaymentStatus::Pending);
        assert!("Approved".parse::<PaymentStatus>().is_err());
        assert_eq!(PaymentStatus::Pending.to_string(), "pending");
    }
}
