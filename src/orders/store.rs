use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{NewOrder, Order};

/// Identity token of one store instance, fixed at construction.
///
/// Two callers that observe the same `InstanceId` are talking to the same
/// backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Uuid);

impl InstanceId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Operations the HTTP layer performs on a resolved order store.
pub trait OrderService: Send + Sync {
    fn instance_id(&self) -> InstanceId;

    /// Appends an order, assigning `max(existing ids) + 1` (or 1 when empty).
    fn add_order(&self, order: NewOrder) -> Order;

    /// Snapshot of the stored orders in insertion order.
    fn orders(&self) -> Vec<Order>;

    fn orders_count(&self) -> usize;
}

/// Append-only, process-memory order store.
///
/// Id assignment reads the current maximum and the append happens in a
/// separate critical section. Each step is memory safe and no append is ever
/// lost, but the pair is not atomic: two concurrent `add_order` calls on a
/// shared instance can both observe the same maximum and store duplicate ids.
/// Callers that share one instance across threads (every singleton, and a
/// scoped instance fanned out within one unit of work) inherit this.
pub struct InMemoryOrderStore {
    instance_id: InstanceId,
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            instance_id: InstanceId::new(),
            orders: RwLock::new(Vec::new()),
        }
    }

    fn next_id(&self) -> u32 {
        self.orders
            .read()
            .iter()
            .map(|order| order.id)
            .max()
            .map_or(1, |max| max + 1)
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryOrderStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryOrderStore")
            .field("instance_id", &self.instance_id)
            .field("orders", &self.orders_count())
            .finish()
    }
}

impl OrderService for InMemoryOrderStore {
    fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    fn add_order(&self, order: NewOrder) -> Order {
        let id = self.next_id();
        let order = order.into_order(id);
        self.orders.write().push(order.clone());
        tracing::trace!(instance = %self.instance_id, id, "order added");
        order
    }

    fn orders(&self) -> Vec<Order> {
        self.orders.read().clone()
    }

    fn orders_count(&self) -> usize {
        self.orders.read().len()
    }
}
