//! # Host Service Traits
//!
//! Interfaces the surrounding e-commerce platform must provide: order
//! persistence, settings storage with per-store overrides, and a locale
//! resource store for display strings. The integration never owns this
//! data; it only reads orders and applies the two allowed transitions.

use crate::error::PaymentResult;
use crate::order::{Order, OrderNote};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store scope for settings overrides. Scope 0 applies to all stores;
/// a non-zero scope overrides it for that store only.
pub type StoreScope = u64;

/// The scope that applies to every store
pub const ALL_STORES: StoreScope = 0;

/// Gateway credentials and environment selection.
///
/// Read from the settings store on every gateway call, never cached, so
/// an admin change takes effect between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Use the sandbox gateway environment
    pub use_sandbox: bool,
    /// Merchant account number (sent as `X-AccountNo`)
    pub account_no: String,
    /// Secret key (sent as `X-SecretKey`)
    pub secret_key: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            use_sandbox: true,
            account_no: String::new(),
            secret_key: String::new(),
        }
    }
}

impl GatewaySettings {
    pub fn new(
        use_sandbox: bool,
        account_no: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            use_sandbox,
            account_no: account_no.into(),
            secret_key: secret_key.into(),
        }
    }
}

/// Order persistence owned by the host platform.
///
/// The note log is append-only and insertion-ordered. Deduplication of a
/// note against the existing log is a single atomic operation so two
/// concurrent cancel callbacks cannot both insert the same note.
#[async_trait::async_trait]
pub trait OrderStore: Send + Sync {
    /// Look up an order by id
    async fn order_by_id(&self, id: u64) -> PaymentResult<Option<Order>>;

    /// All notes for an order, in insertion order
    async fn order_notes(&self, order_id: u64) -> PaymentResult<Vec<OrderNote>>;

    /// Append a note unless a note with identical text already exists.
    /// Returns whether the note was inserted.
    async fn insert_note_if_absent(&self, note: OrderNote) -> PaymentResult<bool>;

    /// Mark an order paid. Idempotent.
    async fn mark_paid(&self, order_id: u64) -> PaymentResult<()>;
}

/// Settings storage with per-store-scope overrides
#[async_trait::async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load settings for a scope, falling back to the all-stores record
    async fn load(&self, scope: StoreScope) -> PaymentResult<GatewaySettings>;

    /// Save settings for a scope
    async fn save(&self, scope: StoreScope, settings: GatewaySettings) -> PaymentResult<()>;

    /// Delete the settings records for every scope
    async fn delete_all(&self) -> PaymentResult<()>;
}

/// Locale resource store for display strings (labels, hints)
#[async_trait::async_trait]
pub trait LocaleStore: Send + Sync {
    /// Insert or update a batch of resources
    async fn upsert_resources(&self, resources: HashMap<String, String>) -> PaymentResult<()>;

    /// Delete every resource whose key starts with `prefix`
    async fn delete_resources_by_prefix(&self, prefix: &str) -> PaymentResult<()>;

    /// Look up a single resource
    async fn resource(&self, key: &str) -> PaymentResult<Option<String>>;
}
