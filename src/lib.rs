//! # keyed-orders
//!
//! An in-memory order tracking service whose only purpose is to make service
//! lifetimes observable. The same order store is registered three times in a
//! small dependency injection container, once as a singleton, once scoped and
//! once transient, and each HTTP request reports the identity of the store it
//! reached.
//!
//! ## Service Lifetimes
//!
//! - **Singleton**: Created once and shared across the entire process
//! - **Scoped**: Created once per scope (one HTTP request)
//! - **Transient**: Created fresh on every resolution
//!
//! ## Quick Start
//!
//! ```rust
//! use keyed_orders::{Lifetime, NewOrder, OrderRegistry, OrderService, ServiceCollection};
//!
//! let mut services = ServiceCollection::new();
//! OrderRegistry::register(&mut services);
//! let provider = services.build();
//!
//! // Two requests, each with its own scope
//! let first = provider.create_scope();
//! let second = provider.create_scope();
//!
//! let store = OrderRegistry::resolve(&first, Lifetime::Singleton).unwrap();
//! store.add_order(NewOrder::new("Widget", 3));
//!
//! let again = OrderRegistry::resolve(&second, Lifetime::Singleton).unwrap();
//! assert_eq!(store.instance_id(), again.instance_id());
//! assert_eq!(again.orders_count(), 1);
//!
//! let scoped_a = OrderRegistry::resolve(&first, Lifetime::Scoped).unwrap();
//! let scoped_b = OrderRegistry::resolve(&second, Lifetime::Scoped).unwrap();
//! assert_ne!(scoped_a.instance_id(), scoped_b.instance_id());
//! ```
//!
//! ## HTTP
//!
//! [`web::app`] serves `GET /`, `GET /api/orders/{lifecycle}` and
//! `POST /api/orders/{lifecycle}` where `lifecycle` is `transient`, `scoped`
//! or `singleton`.

pub mod collection;
pub mod config;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod orders;
pub mod provider;
pub mod telemetry;
pub mod traits;
pub mod web;

mod registration;

pub use collection::ServiceCollection;
pub use error::{DiError, DiResult};
pub use key::{key_of_named, key_of_named_trait, key_of_type, Key};
pub use lifetime::Lifetime;
pub use orders::{InMemoryOrderStore, InstanceId, NewOrder, Order, OrderRegistry, OrderService};
pub use provider::{ResolverContext, Scope, ScopeId, ServiceProvider};
pub use traits::{Resolver, ResolverCore};
