//! # Order Types
//!
//! The slice of the host's order model this integration reads and writes.
//! Orders are owned and persisted by the host platform; the reconciler
//! only ever marks them paid or appends a failure note.

use crate::money::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Billing address fields used to fill the checkout customer block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Raw phone digits as stored by the host (no calling code)
    pub phone: String,
}

impl BillingAddress {
    /// Full name as sent to the gateway ("first last")
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Payment status of an order from this gateway's point of view.
///
/// `Pending -> Paid` is terminal. A failed payment leaves the order
/// `Pending` with a failure note appended, so the shopper can retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPaymentStatus {
    Pending,
    Paid,
}

impl Default for OrderPaymentStatus {
    fn default() -> Self {
        OrderPaymentStatus::Pending
    }
}

/// An order as seen by this integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Host-assigned integer order id; round-tripped through the gateway
    /// as the `reference` string
    pub id: u64,

    /// Billing address (customer name, email, phone)
    pub billing_address: BillingAddress,

    /// Order total; the checkout amount is derived from this
    pub total: Price,

    /// Payment status
    #[serde(default)]
    pub payment_status: OrderPaymentStatus,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a pending order
    pub fn new(id: u64, billing_address: BillingAddress, total: Price) -> Self {
        Self {
            id,
            billing_address,
            total,
            payment_status: OrderPaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// The order id as the decimal string sent to the gateway
    pub fn reference(&self) -> String {
        self.id.to_string()
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == OrderPaymentStatus::Paid
    }
}

/// A note on an order's append-only note log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderNote {
    pub order_id: u64,
    pub note: String,
    /// Whether the host shows this note to the shopper
    pub display_to_customer: bool,
    pub created_at: DateTime<Utc>,
}

impl OrderNote {
    /// Create a customer-visible note
    pub fn customer_visible(order_id: u64, note: impl Into<String>) -> Self {
        Self {
            order_id,
            note: note.into(),
            display_to_customer: true,
            created_at: Utc::now(),
        }
    }
}
