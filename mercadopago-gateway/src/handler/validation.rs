//! Structural validation of inbound checkout preferences.
//!
//! Runs in the handler before anything reaches the controller. The checks are
//! driven by [`ValidationRules`], which the caller builds (or loads from TOML)
//! and injects; there is no process-wide validator.

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::models::Preference;

/// Checks a preference before it is submitted.
pub trait Validator: Send + Sync {
    /// Validates a decoded preference.
    ///
    /// # Errors
    ///
    /// Returns every failing field, in document order.
    fn validate(&self, preference: &Preference) -> Result<(), ValidationErrors>;
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// JSON path of the offending field (e.g. `items[0].title`).
    pub field: String,
    /// What was wrong with it.
    pub message: &'static str,
}

impl FieldError {
    fn new(field: impl Into<String>, message: &'static str) -> Self {
        Self { field: field.into(), message }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All failed checks of one preference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Returns the failed checks.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}

fn join(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Which checks to run.
///
/// The item and email checks are on by default; the payer contact checks are
/// opt-in.
///
/// ```toml
/// [validation]
/// require_payer_phone = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools, reason = "one switch per rule, read from TOML")]
pub struct ValidationRules {
    /// At least one item.
    pub require_items: bool,
    /// Every item has a non-blank title.
    pub require_item_title: bool,
    /// Every item quantity is greater than zero.
    pub require_positive_quantity: bool,
    /// Every item unit price is greater than zero.
    pub require_positive_unit_price: bool,
    /// Payer email is non-blank.
    pub require_payer_email: bool,
    /// Payer phone number is non-blank.
    pub require_payer_phone: bool,
    /// Payer identification number is non-blank.
    pub require_payer_identification: bool,
    /// Payer zip code and street name are non-blank.
    pub require_payer_address: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            require_items: true,
            require_item_title: true,
            require_positive_quantity: true,
            require_positive_unit_price: true,
            require_payer_email: true,
            require_payer_phone: false,
            require_payer_identification: false,
            require_payer_address: false,
        }
    }
}

/// [`Validator`] that applies a fixed set of [`ValidationRules`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleValidator {
    rules: ValidationRules,
}

impl RuleValidator {
    /// Creates a validator for the given rules.
    #[must_use]
    pub const fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Returns the active rules.
    #[must_use]
    pub const fn rules(&self) -> &ValidationRules {
        &self.rules
    }
}

impl Validator for RuleValidator {
    fn validate(&self, preference: &Preference) -> Result<(), ValidationErrors> {
        let rules = &self.rules;
        let mut errors = Vec::new();

        if rules.require_items && preference.items.is_empty() {
            errors.push(FieldError::new("items", "at least one item is required"));
        }

        for (index, item) in preference.items.iter().enumerate() {
            if rules.require_item_title && is_blank(&item.title) {
                errors.push(FieldError::new(format!("items[{index}].title"), "is required"));
            }
            if rules.require_positive_quantity && item.quantity <= 0 {
                errors.push(FieldError::new(
                    format!("items[{index}].quantity"),
                    "must be greater than zero",
                ));
            }
            if rules.require_positive_unit_price && item.unit_price <= Decimal::ZERO {
                errors.push(FieldError::new(
                    format!("items[{index}].unit_price"),
                    "must be greater than zero",
                ));
            }
        }

        let payer = &preference.payer;
        if rules.require_payer_email && is_blank(&payer.email) {
            errors.push(FieldError::new("payer.email", "is required"));
        }
        if rules.require_payer_phone && is_blank(&payer.phone.number) {
            errors.push(FieldError::new("payer.phone.number", "is required"));
        }
        if rules.require_payer_identification && is_blank(&payer.identification.number) {
            errors.push(FieldError::new("payer.identification.number", "is required"));
        }
        if rules.require_payer_address {
            if is_blank(&payer.address.zip_code) {
                errors.push(FieldError::new("payer.address.zip_code", "is required"));
            }
            if is_blank(&payer.address.street_name) {
                errors.push(FieldError::new("payer.address.street_name", "is required"));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(ValidationErrors(errors)) }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
