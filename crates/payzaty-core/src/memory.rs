//! # In-Memory Host Stores
//!
//! Reference implementations of the host traits backed by in-process
//! maps. Used by the demo API binary and throughout the test suites; a
//! real deployment substitutes the platform's own persistence.

use crate::error::{PaymentError, PaymentResult};
use crate::host::{GatewaySettings, LocaleStore, OrderStore, SettingsStore, StoreScope, ALL_STORES};
use crate::order::{Order, OrderNote, OrderPaymentStatus};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct OrderRecord {
    order: Option<Order>,
    notes: Vec<OrderNote>,
}

/// In-memory order store
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    records: RwLock<HashMap<u64, OrderRecord>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an order (test/demo helper)
    pub async fn insert_order(&self, order: Order) {
        let mut records = self.records.write().await;
        let id = order.id;
        records.entry(id).or_default().order = Some(order);
    }
}

#[async_trait::async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn order_by_id(&self, id: u64) -> PaymentResult<Option<Order>> {
        let records = self.records.read().await;
        Ok(records.get(&id).and_then(|r| r.order.clone()))
    }

    async fn order_notes(&self, order_id: u64) -> PaymentResult<Vec<OrderNote>> {
        let records = self.records.read().await;
        Ok(records
            .get(&order_id)
            .map(|r| r.notes.clone())
            .unwrap_or_default())
    }

    async fn insert_note_if_absent(&self, note: OrderNote) -> PaymentResult<bool> {
        // Check and insert under one write lock: the dedup invariant must
        // hold even for concurrent callbacks.
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&note.order_id)
            .ok_or(PaymentError::OrderNotFound {
                order_id: note.order_id,
            })?;

        if record.notes.iter().any(|n| n.note == note.note) {
            return Ok(false);
        }
        record.notes.push(note);
        Ok(true)
    }

    async fn mark_paid(&self, order_id: u64) -> PaymentResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&order_id)
            .and_then(|r| r.order.as_mut())
            .ok_or(PaymentError::OrderNotFound { order_id })?;

        record.payment_status = OrderPaymentStatus::Paid;
        Ok(())
    }
}

/// In-memory settings store with record-level scope overrides
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    scopes: RwLock<HashMap<StoreScope, GatewaySettings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with an all-stores record
    pub fn with_settings(settings: GatewaySettings) -> Self {
        let mut scopes = HashMap::new();
        scopes.insert(ALL_STORES, settings);
        Self {
            scopes: RwLock::new(scopes),
        }
    }
}

#[async_trait::async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self, scope: StoreScope) -> PaymentResult<GatewaySettings> {
        let scopes = self.scopes.read().await;
        scopes
            .get(&scope)
            .or_else(|| scopes.get(&ALL_STORES))
            .cloned()
            .ok_or(PaymentError::SettingsNotFound { scope })
    }

    async fn save(&self, scope: StoreScope, settings: GatewaySettings) -> PaymentResult<()> {
        let mut scopes = self.scopes.write().await;
        scopes.insert(scope, settings);
        Ok(())
    }

    async fn delete_all(&self) -> PaymentResult<()> {
        let mut scopes = self.scopes.write().await;
        scopes.clear();
        Ok(())
    }
}

/// In-memory locale resource store
#[derive(Debug, Default)]
pub struct InMemoryLocaleStore {
    resources: RwLock<HashMap<String, String>>,
}

impl InMemoryLocaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored resources (test helper)
    pub async fn len(&self) -> usize {
        self.resources.read().await.len()
    }
}

#[async_trait::async_trait]
impl LocaleStore for InMemoryLocaleStore {
    async fn upsert_resources(&self, resources: HashMap<String, String>) -> PaymentResult<()> {
        let mut store = self.resources.write().await;
        store.extend(resources);
        Ok(())
    }

    async fn delete_resources_by_prefix(&self, prefix: &str) -> PaymentResult<()> {
        let mut store = self.resources.write().await;
        store.retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }

    async fn resource(&self, key: &str) -> PaymentResult<Option<String>> {
        let store = self.resources.read().await;
        Ok(store.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Price};
    use crate::order::BillingAddress;

    fn order(id: u64) -> Order {
        Order::new(
            id,
            BillingAddress::default(),
            Price::new(244.0, Currency::SAR),
        )
    }

    #[tokio::test]
    async fn test_mark_paid_is_idempotent() {
        let store = InMemoryOrderStore::new();
        store.insert_order(order(1)).await;

        store.mark_paid(1).await.unwrap();
        store.mark_paid(1).await.unwrap();

        let paid = store.order_by_id(1).await.unwrap().unwrap();
        assert!(paid.is_paid());
    }

    #[tokio::test]
    async fn test_note_dedup_by_text() {
        let store = InMemoryOrderStore::new();
        store.insert_order(order(7)).await;

        let inserted = store
            .insert_note_if_absent(OrderNote::customer_visible(7, "payment failed"))
            .await
            .unwrap();
        assert!(inserted);

        let inserted_again = store
            .insert_note_if_absent(OrderNote::customer_visible(7, "payment failed"))
            .await
            .unwrap();
        assert!(!inserted_again);

        let different = store
            .insert_note_if_absent(OrderNote::customer_visible(7, "another note"))
            .await
            .unwrap();
        assert!(different);

        let notes = store.order_notes(7).await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].note, "payment failed");
    }

    #[tokio::test]
    async fn test_note_on_unknown_order_errors() {
        let store = InMemoryOrderStore::new();
        let err = store
            .insert_note_if_absent(OrderNote::customer_visible(99, "x"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_settings_scope_fallback() {
        let store =
            InMemorySettingsStore::with_settings(GatewaySettings::new(true, "acc-all", "key-all"));

        // Unknown scope falls back to the all-stores record
        let fallback = store.load(3).await.unwrap();
        assert_eq!(fallback.account_no, "acc-all");

        // A scoped record overrides it
        store
            .save(3, GatewaySettings::new(false, "acc-3", "key-3"))
            .await
            .unwrap();
        let scoped = store.load(3).await.unwrap();
        assert_eq!(scoped.account_no, "acc-3");
        assert!(!scoped.use_sandbox);

        // Other scopes still see the all-stores record
        let other = store.load(5).await.unwrap();
        assert_eq!(other.account_no, "acc-all");
    }

    #[tokio::test]
    async fn test_settings_delete_all() {
        let store =
            InMemorySettingsStore::with_settings(GatewaySettings::new(true, "acc", "key"));
        store.delete_all().await.unwrap();

        let err = store.load(ALL_STORES).await.unwrap_err();
        assert!(matches!(err, PaymentError::SettingsNotFound { .. }));
    }

    #[tokio::test]
    async fn test_locale_prefix_delete() {
        let store = InMemoryLocaleStore::new();
        let mut resources = HashMap::new();
        resources.insert("plugins.payments.payzaty.fields.accountno".to_string(), "Account No".to_string());
        resources.insert("plugins.payments.other.label".to_string(), "Other".to_string());
        store.upsert_resources(resources).await.unwrap();

        store
            .delete_resources_by_prefix("plugins.payments.payzaty")
            .await
            .unwrap();

        assert!(store
            .resource("plugins.payments.payzaty.fields.accountno")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .resource("plugins.payments.other.label")
            .await
            .unwrap()
            .is_some());
    }
}
