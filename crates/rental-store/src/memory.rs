//! # In-Memory Order Store
//!
//! Process-local store for dry runs and demos. Orders vanish on exit.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use rental_core::{Order, OrderId, OrderStore, StoreError};

/// Append-only `Vec` of orders behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: Mutex<Vec<(OrderId, Order)>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        MemoryOrderStore::default()
    }

    /// Returns a copy of every stored order in insertion order.
    pub fn orders(&self) -> Vec<(OrderId, Order)> {
        match self.orders.lock() {
            Ok(orders) => orders.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.orders().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn append(&self, order: &Order) -> Result<OrderId, StoreError> {
        let id = OrderId::new(Uuid::new_v4().to_string());
        let mut orders = self
            .orders
            .lock()
            .map_err(|_| StoreError::Internal("memory store lock poisoned".to_string()))?;
        orders.push((id.clone(), order.clone()));

        debug!(order_id = %id, stored = orders.len(), "Order kept in memory");
        Ok(id)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
