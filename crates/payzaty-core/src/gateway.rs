//! # Payment Gateway Trait
//!
//! Seam between the callback handlers and the concrete Payzaty client.
//! The gateway supports exactly one flow: create a hosted checkout
//! session, redirect the shopper there, and poll the session for its
//! terminal status when the shopper returns.

use crate::error::{PaymentError, PaymentResult};
use crate::money::Price;
use crate::order::Order;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A checkout session created by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider name (e.g., "payzaty")
    pub provider: String,

    /// Our order id
    pub order_id: u64,

    /// URL of the hosted payment page to redirect the shopper to
    pub checkout_url: String,

    /// Order reference echoed back by the gateway, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

/// Result of polling a checkout session by id.
///
/// `paid` is tri-state: `Some(true)` / `Some(false)` are terminal,
/// `None` means the gateway could not resolve the session (unknown or
/// still pending). `reference` is required whenever `paid` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayStatus {
    pub paid: Option<bool>,
    pub reference: Option<String>,
}

impl GatewayStatus {
    /// Status for a session the gateway could not resolve
    pub fn unresolved() -> Self {
        Self {
            paid: None,
            reference: None,
        }
    }
}

/// Core trait for the payment gateway.
///
/// Payzaty is a one-shot redirect gateway: every operation other than
/// checkout creation and status polling is unsupported and reported as
/// such, never attempted.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a checkout session for an order.
    ///
    /// # Arguments
    /// * `order` - The order to pay for
    /// * `urls` - Success/cancel callback URLs for this store
    ///
    /// # Returns
    /// A `CheckoutSession` whose `checkout_url` the shopper must be
    /// redirected to. A response without a checkout URL is an error,
    /// never a silent no-op.
    async fn create_checkout(
        &self,
        order: &Order,
        urls: &CallbackUrls,
    ) -> PaymentResult<CheckoutSession>;

    /// Poll a checkout session for its payment status.
    async fn checkout_status(&self, checkout_id: &str) -> PaymentResult<GatewayStatus>;

    /// Get the provider name (for logging and error reporting).
    fn provider_name(&self) -> &'static str;

    /// This gateway collects payment on a hosted page.
    fn is_redirection(&self) -> bool {
        true
    }

    fn supports_capture(&self) -> bool {
        false
    }

    fn supports_refund(&self) -> bool {
        false
    }

    fn supports_partial_refund(&self) -> bool {
        false
    }

    fn supports_void(&self) -> bool {
        false
    }

    fn supports_recurring(&self) -> bool {
        false
    }

    /// Capture a previously authorized payment. Not supported.
    async fn capture(&self, _order: &Order) -> PaymentResult<()> {
        Err(self.unsupported("capture"))
    }

    /// Refund a captured payment, fully or partially. Not supported.
    async fn refund(&self, _order: &Order, _amount: Price) -> PaymentResult<()> {
        Err(self.unsupported("refund"))
    }

    /// Void an authorization. Not supported.
    async fn void(&self, _order: &Order) -> PaymentResult<()> {
        Err(self.unsupported("void"))
    }

    /// Charge a recurring payment. Not supported.
    async fn process_recurring(&self, _order: &Order) -> PaymentResult<()> {
        Err(self.unsupported("recurring payment"))
    }

    /// Cancel a recurring payment. Not supported.
    async fn cancel_recurring(&self, _order: &Order) -> PaymentResult<()> {
        Err(self.unsupported("cancel recurring payment"))
    }

    #[doc(hidden)]
    fn unsupported(&self, operation: &'static str) -> PaymentError {
        PaymentError::UnsupportedOperation {
            provider: self.provider_name().to_string(),
            operation,
        }
    }
}

/// Type alias for a shared payment gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

/// Callback URLs derived from the store's base URL
#[derive(Debug, Clone)]
pub struct CallbackUrls {
    /// Base URL of the store (e.g., "https://shop.example.com")
    pub base_url: String,
    /// Success callback path
    pub success_path: String,
    /// Cancel callback path
    pub cancel_path: String,
}

impl CallbackUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            success_path: "/Plugins/PaymentPayzaty/Success".to_string(),
            cancel_path: "/Plugins/PaymentPayzaty/Cancel".to_string(),
        }
    }

    pub fn success_url(&self) -> String {
        format!("{}{}", self.base_url, self.success_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }
}

impl Default for CallbackUrls {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
