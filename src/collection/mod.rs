//! Service collection for registering services.

use std::any::TypeId;
use std::sync::Arc;

use crate::error::DiResult;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::provider::ServiceProvider;
use crate::registration::{AnyArc, Registration, Registry, ResolverContext};

/// Service collection for registering services with their lifetimes.
///
/// Register everything first, then call [`build`](Self::build) once to obtain
/// the [`ServiceProvider`]. Registering the same key twice replaces the earlier
/// registration.
///
/// # Examples
///
/// ```rust
/// use keyed_orders::{ServiceCollection, Resolver, Lifetime};
/// use std::sync::Arc;
///
/// struct Ledger(u32);
///
/// let mut services = ServiceCollection::new();
/// services
///     .add_named_factory::<Ledger, _>("daily", Lifetime::Transient, |_| Ledger(1))
///     .add_named_factory::<Ledger, _>("yearly", Lifetime::Singleton, |_| Ledger(365));
///
/// let provider = services.build();
/// assert_eq!(provider.get_named_required::<Ledger>("yearly").0, 365);
/// assert!(!Arc::ptr_eq(
///     &provider.get_named_required::<Ledger>("daily"),
///     &provider.get_named_required::<Ledger>("daily"),
/// ));
/// ```
pub struct ServiceCollection {
    registry: Registry,
}

impl ServiceCollection {
    /// Creates a new empty service collection.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    // ----- Concrete Type Registrations -----

    /// Registers an already-built singleton instance.
    pub fn add_singleton<T: 'static + Send + Sync>(&mut self, value: T) -> &mut Self {
        let arc = Arc::new(value);
        let ctor = move |_: &ResolverContext| -> DiResult<AnyArc> { Ok(arc.clone()) };
        self.registry.insert(
            Key::Type(TypeId::of::<T>(), std::any::type_name::<T>()),
            Registration::new(Lifetime::Singleton, Arc::new(ctor)),
        );
        self
    }

    /// Registers a singleton factory, invoked once on first resolution.
    pub fn add_singleton_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Singleton, factory)
    }

    /// Registers a scoped factory that creates one instance per scope.
    pub fn add_scoped_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Scoped, factory)
    }

    /// Registers a transient factory that creates a new instance on every resolution.
    pub fn add_transient_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Transient, factory)
    }

    /// Registers a factory for `T` with an explicit lifetime.
    pub fn add_factory<T, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        let key = Key::Type(TypeId::of::<T>(), std::any::type_name::<T>());
        self.insert_factory(key, lifetime, factory)
    }

    // ----- Named (keyed) Registrations -----

    /// Registers a factory for `T` under `name` with an explicit lifetime.
    ///
    /// The same `T` may be registered under several names, each with its own
    /// lifetime and therefore its own instances.
    pub fn add_named_factory<T, F>(&mut self, name: &'static str, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        let key = Key::TypeNamed(TypeId::of::<T>(), std::any::type_name::<T>(), name);
        self.insert_factory(key, lifetime, factory)
    }

    /// Registers a trait-object factory under `name` with an explicit lifetime.
    ///
    /// Resolve it with [`Resolver::get_named_trait`](crate::Resolver::get_named_trait).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyed_orders::{ServiceCollection, Resolver, Lifetime};
    /// use std::sync::Arc;
    ///
    /// trait Tally: Send + Sync { fn value(&self) -> u32; }
    /// struct Fixed(u32);
    /// impl Tally for Fixed { fn value(&self) -> u32 { self.0 } }
    ///
    /// let mut services = ServiceCollection::new();
    /// services.add_named_trait_factory::<dyn Tally, _>("seven", Lifetime::Singleton, |_| {
    ///     Arc::new(Fixed(7)) as Arc<dyn Tally>
    /// });
    ///
    /// let provider = services.build();
    /// assert_eq!(provider.get_named_trait_required::<dyn Tally>("seven").value(), 7);
    /// ```
    pub fn add_named_trait_factory<Trait, F>(&mut self, name: &'static str, lifetime: Lifetime, factory: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        F: Fn(&ResolverContext) -> Arc<Trait> + Send + Sync + 'static,
    {
        let key = Key::TraitNamed(std::any::type_name::<Trait>(), name);
        let ctor = move |r: &ResolverContext| -> DiResult<AnyArc> {
            // Stored as Arc<Arc<dyn Trait>> so the outer Arc can be downcast
            Ok(Arc::new(factory(r)) as AnyArc)
        };
        self.registry.insert(key, Registration::new(lifetime, Arc::new(ctor)));
        self
    }

    fn insert_factory<T, F>(&mut self, key: Key, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: 'static + Send + Sync,
        F: Fn(&ResolverContext) -> T + Send + Sync + 'static,
    {
        let ctor = move |r: &ResolverContext| -> DiResult<AnyArc> { Ok(Arc::new(factory(r))) };
        self.registry.insert(key, Registration::new(lifetime, Arc::new(ctor)));
        self
    }

    // ----- Introspection -----

    /// Whether a registration exists for `key`.
    pub fn contains(&self, key: &Key) -> bool {
        self.registry.contains_key(key)
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    /// Builds the service provider, consuming the collection.
    pub fn build(mut self) -> ServiceProvider {
        self.registry.finalize();
        tracing::debug!(
            registrations = self.registry.len(),
            scoped = self.registry.scoped_count,
            "service provider built"
        );
        ServiceProvider::new(self.registry)
    }
}

impl Default for ServiceCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{key_of_named, key_of_named_trait, key_of_type};

    trait Marker: Send + Sync {}
    struct Unit;
    impl Marker for Unit {}

    #[test]
    fn tracks_registrations_by_key() {
        let mut services = ServiceCollection::new();
        assert!(services.is_empty());

        services
            .add_singleton(1u8)
            .add_named_factory::<u8, _>("two", Lifetime::Scoped, |_| 2u8)
            .add_named_trait_factory::<dyn Marker, _>("unit", Lifetime::Transient, |_| Arc::new(Unit) as Arc<dyn Marker>);

        assert_eq!(services.len(), 3);
        assert!(services.contains(&key_of_type::<u8>()));
        assert!(services.contains(&key_of_named::<u8>("two")));
        assert!(services.contains(&key_of_named_trait::<dyn Marker>("unit")));
        assert!(!services.contains(&key_of_named::<u8>("three")));
    }

    #[test]
    fn last_registration_wins() {
        use crate::Resolver;

        let mut services = ServiceCollection::new();
        services.add_transient_factory::<u32, _>(|_| 1);
        services.add_transient_factory::<u32, _>(|_| 2);
        assert_eq!(services.len(), 1);

        let provider = services.build();
        assert_eq!(*provider.get_required::<u32>(), 2);
    }
}
