use async_trait::async_trait;
use privateclaw_types::Order;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Shared order collection the UI flows and the reconciler both see.
///
/// The reconciler reads a fresh snapshot at the start of every tick and
/// commits at most one full replace per tick, so implementations must make
/// `set_orders` atomic with respect to concurrent readers.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Snapshot of the current orders
    async fn get_orders(&self) -> Result<Vec<Order>, StoreError>;

    /// Atomically replace the full order list
    async fn set_orders(&self, orders: Vec<Order>) -> Result<(), StoreError>;
}

/// In-process store backed by a read-write lock
#[derive(Debug, Default, Clone)]
pub struct SharedOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl SharedOrderStore {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append a freshly created order (UI-side placement path)
    pub fn insert(&self, order: Order) {
        self.orders.write().unwrap().push(order);
    }

    pub fn len(&self) -> usize {
        self.orders.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.read().unwrap().is_empty()
    }
}

#[async_trait]
impl OrderStore for SharedOrderStore {
    async fn get_orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.read().unwrap().clone())
    }

    async fn set_orders(&self, orders: Vec<Order>) -> Result<(), StoreError> {
        *self.orders.write().unwrap() = orders;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use privateclaw_types::OrderSide;
    use rust_decimal::Decimal;

    fn test_order(pair: &str) -> Order {
        Order::new(pair, OrderSide::Buy, 1_000, Decimal::ONE, "aleo1owner")
    }

    #[tokio::test]
    async fn insert_and_snapshot() {
        let store = SharedOrderStore::new();
        assert!(store.is_empty());

        store.insert(test_order("pair-1"));
        store.insert(test_order("pair-2"));

        let orders = store.get_orders().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].pair_id, "pair-1");
    }

    #[tokio::test]
    async fn set_orders_replaces_wholesale() {
        let store = SharedOrderStore::new();
        store.insert(test_order("pair-1"));
        store.insert(test_order("pair-2"));

        let replacement = vec![test_order("pair-3")];
        store.set_orders(replacement).await.unwrap();

        let orders = store.get_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].pair_id, "pair-3");
    }

    #[tokio::test]
    async fn snapshot_is_detached_from_store() {
        let store = SharedOrderStore::new();
        store.insert(test_order("pair-1"));

        let mut snapshot = store.get_orders().await.unwrap();
        snapshot[0].mark_cancelled();

        let fresh = store.get_orders().await.unwrap();
        assert_eq!(fresh[0].order_status, privateclaw_types::OrderStatus::Open);
    }
}
