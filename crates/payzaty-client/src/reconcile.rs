//! # Callback Reconciler
//!
//! Interprets a polled checkout status and drives the order's state
//! transition: `Pending -> Paid` on success, or a single failure note on
//! decline (the order stays pending so the shopper can retry). The
//! Success and Cancel callbacks run this identical rule set; which one
//! fired only matters for logging.

use payzaty_core::{BoxedPaymentGateway, OrderNote, OrderStore};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Note appended to an order when the gateway reports the payment failed.
/// Deduplicated against the existing note log, so repeated callbacks for
/// the same failed checkout insert it at most once.
pub const PAYMENT_FAILED_NOTE: &str =
    "The payment failed. Please try again from the order details page.";

/// Which return callback triggered the reconciliation (logging only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    Success,
    Cancel,
}

impl CallbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackKind::Success => "success",
            CallbackKind::Cancel => "cancel",
        }
    }
}

/// Where to send the shopper after reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Terminal status resolved for this order; show the completed page
    Completed { order_id: u64 },
    /// Status unknown, order missing, or gateway unreachable
    Home,
}

impl CallbackOutcome {
    /// Relative redirect target for this outcome
    pub fn redirect_path(&self) -> String {
        match self {
            CallbackOutcome::Completed { order_id } => {
                format!("/checkout/completed?orderId={}", order_id)
            }
            CallbackOutcome::Home => "/".to_string(),
        }
    }
}

/// Polls the gateway and applies the resulting order transition
#[derive(Clone)]
pub struct Reconciler {
    gateway: BoxedPaymentGateway,
    orders: Arc<dyn OrderStore>,
}

impl Reconciler {
    pub fn new(gateway: BoxedPaymentGateway, orders: Arc<dyn OrderStore>) -> Self {
        Self { gateway, orders }
    }

    /// Resolve a return callback.
    ///
    /// Never fails: every error path degrades to a home redirect with no
    /// order mutation, so a flaky gateway cannot crash the host request
    /// pipeline.
    #[instrument(skip(self), fields(callback = kind.as_str()))]
    pub async fn resolve(&self, checkout_id: &str, kind: CallbackKind) -> CallbackOutcome {
        let status = match self.gateway.checkout_status(checkout_id).await {
            Ok(status) => status,
            Err(e) => {
                warn!("Status poll failed for checkout {}: {}", checkout_id, e);
                return CallbackOutcome::Home;
            }
        };

        let Some(paid) = status.paid else {
            info!("Checkout {} unresolved (no paid field)", checkout_id);
            return CallbackOutcome::Home;
        };

        let reference = status.reference.unwrap_or_default();
        let order_id: u64 = match reference.parse() {
            Ok(id) => id,
            Err(_) => {
                warn!(
                    "Checkout {} carried unparsable reference {:?}",
                    checkout_id, reference
                );
                return CallbackOutcome::Home;
            }
        };

        let order = match self.orders.order_by_id(order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                info!("Order {} not found for checkout {}", order_id, checkout_id);
                return CallbackOutcome::Home;
            }
            Err(e) => {
                warn!("Order lookup failed for {}: {}", order_id, e);
                return CallbackOutcome::Home;
            }
        };

        if paid {
            if let Err(e) = self.orders.mark_paid(order.id).await {
                warn!("Failed to mark order {} paid: {}", order.id, e);
                return CallbackOutcome::Home;
            }
            info!("Order {} marked paid via {} callback", order.id, kind.as_str());
            return CallbackOutcome::Completed { order_id: order.id };
        }

        // Payment failed: append the failure note at most once, then send
        // the shopper to the completed page either way so they can retry
        // from the order details.
        let note = OrderNote::customer_visible(order.id, PAYMENT_FAILED_NOTE);
        match self.orders.insert_note_if_absent(note).await {
            Ok(true) => info!("Recorded failed payment for order {}", order.id),
            Ok(false) => debug!("Failure note already present on order {}", order.id),
            Err(e) => {
                warn!("Failed to record failure note for order {}: {}", order.id, e);
                return CallbackOutcome::Home;
            }
        }

        CallbackOutcome::Completed { order_id: order.id }
    }
}
