//! Order tracking domain.
//!
//! One [`InMemoryOrderStore`] implementation registered three times, once per
//! [`Lifetime`](crate::Lifetime), so that which instance a caller reaches (and
//! therefore which orders it sees) reveals the lifetime's semantics.

mod model;
mod registry;
mod store;

pub use model::{NewOrder, Order};
pub use registry::OrderRegistry;
pub use store::{InMemoryOrderStore, InstanceId, OrderService};
