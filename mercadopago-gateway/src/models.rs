//! Payment data models for the Mercado Pago gateway.
//!
//! This module defines the outbound checkout preference payload and the read
//! models decoded from payment lookups and searches.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// OAuth client credentials.
///
/// Built per call and never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Application client identifier.
    pub client_id: String,
    /// Application client secret.
    pub client_secret: String,
}

impl Credentials {
    /// Creates credentials from a client id and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Opaque bearer token issued by the OAuth endpoint.
///
/// Callers own reuse and expiry; the gateway never caches it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token and returns the raw string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Checkout preference submitted to `POST /checkout/preferences`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preference {
    /// Merchant-side reference used to correlate payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
    /// Free-form description shown on the checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Line items. At least one is required.
    pub items: Vec<Item>,
    /// Payment method restrictions.
    pub payment_methods: PaymentMethods,
    /// Webhook URL for payment notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    /// Buyer information.
    pub payer: Payer,
    /// Redirect URLs after checkout.
    pub redirect_urls: RedirectUrls,
    /// Back URLs after checkout.
    pub back_urls: RedirectUrls,
    /// Automatic return mode (e.g. "approved").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_return: Option<String>,
}

/// Line item of a checkout preference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Merchant item identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Item title (required).
    pub title: String,
    /// Item description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Picture shown on the checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    /// Item category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<String>,
    /// Quantity, must be greater than zero.
    pub quantity: i32,
    /// Unit price, must be greater than zero. Sent as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

/// Buyer information attached to a preference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payer {
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Contact email (required).
    pub email: String,
    /// Contact phone.
    pub phone: Phone,
    /// Identity document.
    pub identification: Identification,
    /// Postal address.
    pub address: Address,
    /// Buyer registration date as sent by the caller.
    #[serde(rename = "date_created", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Phone number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phone {
    /// Area code.
    pub area_code: String,
    /// Subscriber number.
    pub number: String,
}

/// Identity document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identification {
    /// Document type (e.g. "DNI", "CPF").
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Document number.
    #[serde(deserialize_with = "null_as_default")]
    pub number: String,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Postal code.
    pub zip_code: String,
    /// Street name.
    pub street_name: String,
    /// Street number.
    pub street_number: u32,
    /// Neighborhood.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Success, pending and failure URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectUrls {
    /// URL used after an approved payment.
    pub success: String,
    /// URL used while the payment is pending.
    pub pending: String,
    /// URL used after a rejected payment.
    pub failure: String,
}

/// Payment method restrictions of a preference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethods {
    /// Payment methods hidden from the checkout.
    pub excluded_payment_methods: Vec<ExcludedPaymentMethod>,
    /// Maximum number of installments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    /// Installments preselected on the checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_installments: Option<u32>,
}

/// Payment method excluded from a checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedPaymentMethod {
    /// Payment method identifier (e.g. "visa").
    pub id: String,
}

/// Result of a preference creation.
///
/// Only these two fields are kept from the remote response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceResult {
    /// Preference identifier.
    pub id: String,
    /// Checkout URL (remote `init_point`).
    pub checkout_url: String,
}

/// Payment read model from `GET /v1/payments/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment identifier.
    pub id: u64,
    /// Seller account identifier.
    pub collector_id: u64,
    /// ISO 4217 currency code.
    #[serde(deserialize_with = "null_as_default")]
    pub currency_id: String,
    /// Payment type (e.g. "credit_card", "ticket").
    #[serde(default)]
    pub payment_type_id: Option<String>,
    /// Approval timestamp, absent until approved.
    #[serde(default)]
    pub date_approved: Option<DateTime<FixedOffset>>,
    /// Merchant-side reference.
    #[serde(default)]
    pub external_reference: Option<String>,
    /// Number of installments.
    #[serde(default, deserialize_with = "null_as_default")]
    pub installments: u32,
    /// Linked merchant order.
    #[serde(default)]
    pub order: Option<PaymentOrder>,
    /// Buyer information.
    #[serde(deserialize_with = "null_as_default")]
    pub payer: PaymentPayer,
    /// Charged amount.
    pub transaction_amount: Decimal,
    /// Whether the amount was captured.
    #[serde(default, deserialize_with = "null_as_default")]
    pub captured: bool,
    /// Remote payment status, passed through unchanged.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

/// Merchant order linked to a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentOrder {
    /// Order identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Order type.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
}

/// Buyer information of a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentPayer {
    /// Buyer email, when disclosed.
    pub email: Option<String>,
    /// Identity document.
    #[serde(deserialize_with = "null_as_default")]
    pub identification: Identification,
}

/// Abbreviated payment record returned by the payment search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Payment identifier.
    pub id: u64,
    /// Merchant-side reference.
    #[serde(default)]
    pub external_reference: Option<String>,
    /// Seller account identifier.
    pub collector_id: u64,
    /// ISO 4217 currency code.
    #[serde(deserialize_with = "null_as_default")]
    pub currency_id: String,
    /// Payment type.
    #[serde(default)]
    pub payment_type_id: Option<String>,
    /// Buyer information.
    #[serde(default, deserialize_with = "null_as_default")]
    pub payer: PaymentPayer,
    /// Remote payment status.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

/// Payment search result, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSearchResult {
    /// Matching payments in remote order.
    pub results: Vec<PaymentSummary>,
}

impl PaymentSearchResult {
    /// Returns the number of payments found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no payment matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Reads JSON `null` as the type's default.
///
/// Mercado Pago sends `null` for read-model fields it has no value for
/// (e.g. `"identification": {"type": null, "number": null}`). A value of the
/// wrong type is still an error.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
