//! # Checkout Request Builder
//!
//! Pure construction of the checkout-initiation payload from an order.
//! The `reference` field carries the order id as a decimal string; the
//! status poll echoes it back so the callback can find the order again.

use crate::config::COUNTRY_CALLING_CODE;
use payzaty_core::Order;
use serde::{Deserialize, Serialize};

/// Customer block of the initiation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutCustomer {
    pub name: String,
    pub email: String,
    /// Phone with the country calling code prefixed
    pub phone: String,
}

/// Checkout-initiation payload POSTed to the gateway.
///
/// Built once per order and never persisted; it is a transient message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Order total in minor currency units, rounded at `Price` construction
    pub amount: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Hosted-page language
    pub language: String,
    /// Order id as a decimal string (join key with the host's orders)
    pub reference: String,
    pub customer: CheckoutCustomer,
    /// Where the gateway sends the shopper after payment
    pub response_url: String,
    /// Where the gateway sends the shopper on cancel
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Build the initiation payload for an order.
    pub fn from_order(
        order: &Order,
        language: impl Into<String>,
        response_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            amount: order.total.amount,
            currency: order.total.currency.as_str().to_string(),
            language: language.into(),
            reference: order.reference(),
            customer: CheckoutCustomer {
                name: order.billing_address.full_name(),
                email: order.billing_address.email.clone(),
                phone: normalize_phone(&order.billing_address.phone),
            },
            response_url: response_url.into(),
            cancel_url: cancel_url.into(),
        }
    }
}

/// Prefix the fixed country calling code to a stored phone number.
///
/// Numbers already carrying the prefix are left untouched; any other
/// stored form (leading zero, other country code) is prefixed as-is.
pub fn normalize_phone(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with(COUNTRY_CALLING_CODE) {
        raw.to_string()
    } else {
        format!("{}{}", COUNTRY_CALLING_CODE, raw)
    }
}
