//! Order store
//!
//! Rows are immutable after insertion except `status` and
//! `last_modified_at`. The transition check runs inside the per-key write
//! guard: two concurrent `update_status` calls on the same order serialize,
//! and only one can leave `PENDING`.

use dashmap::DashMap;
use shared::models::{Order, OrderStatus};
use shared::util::now_millis;

use super::{StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct OrderStore {
    orders: DashMap<String, Order>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, order: Order) {
        self.orders.insert(order.id.clone(), order);
    }

    pub fn find_by_id(&self, id: &str) -> Option<Order> {
        self.orders.get(id).map(|entry| entry.value().clone())
    }

    /// All orders, newest first
    pub fn find_all(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self.orders.iter().map(|e| e.value().clone()).collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        orders
    }

    /// Apply a status transition, enforcing the order state machine
    ///
    /// The check-and-set happens while holding the map's write guard for the
    /// key, so concurrent transitions on the same order cannot both succeed.
    pub fn update_status(&self, id: &str, new_status: OrderStatus) -> StoreResult<Order> {
        let mut entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("Order {}", id)))?;
        let order = entry.value_mut();

        if !order.status.can_transition_to(new_status) {
            return Err(StoreError::InvalidTransition {
                from: order.status.to_string(),
                to: new_status.to_string(),
            });
        }

        order.status = new_status;
        order.last_modified_at = now_millis();
        Ok(order.clone())
    }

    pub fn count(&self) -> usize {
        self.orders.len()
    }
}
