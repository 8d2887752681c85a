//! Service provider module for dependency injection.
//!
//! This module contains the root `ServiceProvider`, the per-unit-of-work
//! `Scope`, and the `ResolverContext` factories resolve through.

use std::sync::Arc;

use crate::registration::{AnyArc, Registration, Registry};
use crate::traits::{Resolver, ResolverCore};
use crate::{DiError, DiResult, Key, Lifetime};

pub mod context;
pub mod scope;
pub use context::ResolverContext;
pub use scope::{Scope, ScopeId};

/// Service provider for resolving dependencies from the DI container.
///
/// The root provider owns every singleton. It can resolve singleton and
/// transient services directly; scoped services need a [`Scope`], created with
/// [`create_scope`](Self::create_scope) once per unit of work.
///
/// # Thread Safety
///
/// `ServiceProvider` is `Send + Sync` and cheap to clone (it is an `Arc`
/// internally). Singleton construction is guarded so that concurrent first
/// resolutions construct exactly one instance.
///
/// # Examples
///
/// ```
/// use keyed_orders::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct Settings { region: String }
///
/// let mut collection = ServiceCollection::new();
/// collection.add_singleton(Settings { region: "eu".to_string() });
///
/// let provider = collection.build();
/// let a = provider.get_required::<Settings>();
/// let b = provider.create_scope().get_required::<Settings>();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct ServiceProvider {
    inner: Arc<ProviderInner>,
}

pub(crate) struct ProviderInner {
    pub(crate) registry: Registry,
}

impl ServiceProvider {
    /// Create a new ServiceProvider from a finalized registry.
    pub(crate) fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(ProviderInner { registry }),
        }
    }

    #[inline]
    pub(crate) fn inner(&self) -> &ProviderInner {
        &self.inner
    }

    /// Creates a new scope for resolving scoped services.
    ///
    /// Each scope gets its own cache of scoped instances while sharing the
    /// root's singletons.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_orders::{ServiceCollection, Resolver};
    /// use std::sync::Arc;
    ///
    /// struct Basket;
    ///
    /// let mut collection = ServiceCollection::new();
    /// collection.add_scoped_factory::<Basket, _>(|_| Basket);
    ///
    /// let provider = collection.build();
    /// let scope1 = provider.create_scope();
    /// let scope2 = provider.create_scope();
    ///
    /// assert!(Arc::ptr_eq(&scope1.get_required::<Basket>(), &scope1.get_required::<Basket>()));
    /// assert!(!Arc::ptr_eq(&scope1.get_required::<Basket>(), &scope2.get_required::<Basket>()));
    /// assert_ne!(scope1.id(), scope2.id());
    /// ```
    pub fn create_scope(&self) -> Scope {
        Scope::new(self.clone())
    }

    /// Number of registrations this provider was built from.
    pub fn registration_count(&self) -> usize {
        self.inner().registry.len()
    }

    /// Resolves a singleton, constructing it on first use.
    ///
    /// `get_or_try_init` blocks racing callers until the first constructor
    /// finishes, so a singleton is never constructed twice.
    pub(crate) fn resolve_singleton(&self, reg: &Registration, key: &Key) -> DiResult<AnyArc> {
        match &reg.single_runtime {
            Some(cell) => cell
                .get_or_try_init(|| {
                    tracing::debug!(service = key.display_name(), name = key.service_name().unwrap_or("-"), "constructing singleton");
                    let ctx = ResolverContext::new(self);
                    (reg.ctor)(&ctx)
                })
                .cloned(),
            None => Err(DiError::WrongLifetime("Singleton registration without a cache cell")),
        }
    }

    fn resolve_any_impl(&self, key: &Key) -> DiResult<AnyArc> {
        let reg = self
            .inner()
            .registry
            .get(key)
            .ok_or(DiError::NotFound(key.display_name()))?;

        match reg.lifetime {
            Lifetime::Singleton => self.resolve_singleton(reg, key),
            Lifetime::Scoped => Err(DiError::WrongLifetime("Cannot resolve scoped service from root provider")),
            Lifetime::Transient => {
                let ctx = ResolverContext::new(self);
                (reg.ctor)(&ctx)
            }
        }
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut lines: Vec<String> = self
            .inner()
            .registry
            .iter()
            .map(|(k, r)| match k.service_name() {
                Some(name) => format!("  {} [{}]: {:?}", k.display_name(), name, r.lifetime),
                None => format!("  {}: {:?}", k.display_name(), r.lifetime),
            })
            .collect();
        lines.sort();

        let mut s = String::from("=== Service Provider Debug ===\n");
        for line in lines {
            s.push_str(&line);
            s.push('\n');
        }
        s
    }
}

impl Clone for ServiceProvider {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("registrations", &self.registration_count())
            .finish()
    }
}

impl ResolverCore for ServiceProvider {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        self.resolve_any_impl(key)
    }
}

impl Resolver for ServiceProvider {}
