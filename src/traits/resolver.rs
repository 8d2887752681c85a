//! Resolver traits for service resolution.

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::Key;

/// Core resolver trait for object-safe service resolution.
///
/// Most users should use the [`Resolver`] trait instead, which provides
/// typed generic methods built on top of this one.
pub trait ResolverCore: Send + Sync {
    /// Resolves a single service by key, honoring its registered lifetime.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - The resolved service wrapped in `Arc<dyn Any>`
    /// * `Err(DiError)` - Not found, or a scoped service asked of the root provider
    fn resolve_any(&self, key: &Key) -> DiResult<Arc<dyn Any + Send + Sync>>;
}

/// High-level resolver interface with generic methods for type-safe service resolution.
///
/// `ServiceProvider`, `Scope` and the `ResolverContext` handed to factories all
/// implement this trait, so a factory resolves its dependencies from whichever
/// scope is constructing it.
///
/// # Examples
///
/// ```
/// use keyed_orders::{ServiceCollection, Resolver, Lifetime};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> String { "hello".into() }
/// }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(42usize);
/// services.add_named_trait_factory::<dyn Greeter, _>("en", Lifetime::Transient, |_| {
///     Arc::new(English) as Arc<dyn Greeter>
/// });
///
/// let provider = services.build();
/// assert_eq!(*provider.get_required::<usize>(), 42);
/// assert_eq!(provider.get_named_trait_required::<dyn Greeter>("en").greet(), "hello");
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves a concrete service type.
    fn get<T: 'static + Send + Sync>(&self) -> DiResult<Arc<T>> {
        let key = Key::Type(TypeId::of::<T>(), std::any::type_name::<T>());
        let any = self.resolve_any(&key)?;
        any.downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Resolves a concrete service type, panicking if it cannot be resolved.
    fn get_required<T: 'static + Send + Sync>(&self) -> Arc<T> {
        self.get::<T>()
            .unwrap_or_else(|e| panic!("Failed to resolve {}: {:?}", std::any::type_name::<T>(), e))
    }

    /// Resolves a concrete service registered under `name`.
    fn get_named<T: 'static + Send + Sync>(&self, name: &'static str) -> DiResult<Arc<T>> {
        let key = Key::TypeNamed(TypeId::of::<T>(), std::any::type_name::<T>(), name);
        let any = self.resolve_any(&key)?;
        any.downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    fn get_named_required<T: 'static + Send + Sync>(&self, name: &'static str) -> Arc<T> {
        self.get_named::<T>(name)
            .unwrap_or_else(|e| panic!("Failed to resolve named {} ({}): {:?}", std::any::type_name::<T>(), name, e))
    }

    /// Resolves a trait object registered under `name`.
    ///
    /// Trait objects are stored as `Arc<Arc<dyn Trait>>` behind the type-erased
    /// `Arc<dyn Any>`, since `dyn Trait` itself cannot be downcast to.
    fn get_named_trait<T: ?Sized + 'static + Send + Sync>(&self, name: &'static str) -> DiResult<Arc<T>>
    where
        Arc<T>: 'static,
    {
        let key = Key::TraitNamed(std::any::type_name::<T>(), name);
        let any = self.resolve_any(&key)?;
        any.downcast::<Arc<T>>()
            .map(|boxed| (*boxed).clone())
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    fn get_named_trait_required<T: ?Sized + 'static + Send + Sync>(&self, name: &'static str) -> Arc<T>
    where
        Arc<T>: 'static,
    {
        self.get_named_trait::<T>(name)
            .unwrap_or_else(|e| panic!("Failed to resolve named trait {} ({}): {:?}", std::any::type_name::<T>(), name, e))
    }
}
