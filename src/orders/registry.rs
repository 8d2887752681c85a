use std::sync::Arc;

use super::store::{InMemoryOrderStore, OrderService};
use crate::traits::Resolver;
use crate::{DiResult, Lifetime, Scope, ServiceCollection};

/// Keyed registrations of the order store, one per lifetime.
///
/// Each lifetime's [`Lifetime::as_str`] is the registration name, so resolving
/// `"scoped"` reaches the store registered with [`Lifetime::Scoped`].
///
/// # Examples
///
/// ```rust
/// use keyed_orders::{Lifetime, OrderRegistry, OrderService, ServiceCollection};
///
/// let mut services = ServiceCollection::new();
/// OrderRegistry::register(&mut services);
/// let provider = services.build();
///
/// let scope = provider.create_scope();
/// let a = OrderRegistry::resolve(&scope, Lifetime::Scoped).unwrap();
/// let b = OrderRegistry::resolve(&scope, Lifetime::Scoped).unwrap();
/// assert_eq!(a.instance_id(), b.instance_id());
///
/// let t1 = OrderRegistry::resolve(&scope, Lifetime::Transient).unwrap();
/// let t2 = OrderRegistry::resolve(&scope, Lifetime::Transient).unwrap();
/// assert_ne!(t1.instance_id(), t2.instance_id());
/// ```
pub struct OrderRegistry;

impl OrderRegistry {
    /// Registers `InMemoryOrderStore` as `dyn OrderService` under every lifetime.
    pub fn register(services: &mut ServiceCollection) -> &mut ServiceCollection {
        for lifetime in Lifetime::ALL {
            services.add_named_trait_factory::<dyn OrderService, _>(lifetime.as_str(), lifetime, move |_| {
                let store = InMemoryOrderStore::new();
                tracing::debug!(lifetime = lifetime.as_str(), instance = %store.instance_id(), "order store constructed");
                Arc::new(store) as Arc<dyn OrderService>
            });
        }
        services
    }

    /// Resolves the store registered for `lifetime` within `scope`.
    pub fn resolve(scope: &Scope, lifetime: Lifetime) -> DiResult<Arc<dyn OrderService>> {
        scope.get_named_trait::<dyn OrderService>(lifetime.as_str())
    }
}
