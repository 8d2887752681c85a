//! Scoped service resolution.
//!
//! A `Scope` is the explicit unit-of-work handle: whoever defines the unit of
//! work (one HTTP request, one job, one test) creates a scope and resolves
//! through it. Nothing here relies on thread-local or ambient state.

use std::fmt;

use once_cell::sync::OnceCell;
use uuid::Uuid;

use super::{ResolverContext, ServiceProvider};
use crate::registration::{AnyArc, Registration};
use crate::traits::{Resolver, ResolverCore};
use crate::{DiError, DiResult, Key, Lifetime};

/// Identifier of one scope, for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(Uuid);

impl ScopeId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Scoped service container for request-scoped dependency resolution.
///
/// # Lifetime Behavior
///
/// - **Singleton**: Resolved and cached in the root provider (shared across all scopes)
/// - **Scoped**: Resolved and cached within this specific scope
/// - **Transient**: Created fresh on every resolution (no caching)
///
/// # Examples
///
/// ```
/// use keyed_orders::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct Connection;
/// struct Repository { conn: Arc<Connection> }
///
/// let mut collection = ServiceCollection::new();
/// collection.add_scoped_factory::<Connection, _>(|_| Connection);
/// collection.add_transient_factory::<Repository, _>(|r| Repository {
///     conn: r.get_required::<Connection>(),
/// });
///
/// let provider = collection.build();
/// let scope = provider.create_scope();
///
/// // Two transient repositories share the scope's connection
/// let a = scope.get_required::<Repository>();
/// let b = scope.get_required::<Repository>();
/// assert!(!Arc::ptr_eq(&a, &b));
/// assert!(Arc::ptr_eq(&a.conn, &b.conn));
/// ```
pub struct Scope {
    root: ServiceProvider,
    id: ScopeId,
    // One cell per scoped registration, indexed by `Registration::scoped_slot`
    scoped_cells: Box<[OnceCell<AnyArc>]>,
}

impl Scope {
    pub(crate) fn new(root: ServiceProvider) -> Self {
        let scoped_count = root.inner().registry.scoped_count;
        let scoped_cells: Box<[OnceCell<AnyArc>]> = (0..scoped_count)
            .map(|_| OnceCell::new())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        let id = ScopeId::new();
        tracing::trace!(scope = %id, "scope created");

        Self {
            root,
            id,
            scoped_cells,
        }
    }

    /// This scope's identifier.
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// The root provider this scope was created from.
    pub fn root(&self) -> &ServiceProvider {
        &self.root
    }

    fn resolve_scoped(&self, reg: &Registration, key: &Key) -> DiResult<AnyArc> {
        let slot = reg
            .scoped_slot
            .ok_or(DiError::WrongLifetime("Scoped registration without a slot"))?;
        let cell = self
            .scoped_cells
            .get(slot)
            .ok_or(DiError::WrongLifetime("Scoped slot outside this scope"))?;

        cell.get_or_try_init(|| {
            tracing::debug!(scope = %self.id, service = key.display_name(), name = key.service_name().unwrap_or("-"), "constructing scoped service");
            let ctx = ResolverContext::new(self);
            (reg.ctor)(&ctx)
        })
        .cloned()
    }

    fn resolve_any_impl(&self, key: &Key) -> DiResult<AnyArc> {
        let reg = self
            .root
            .inner()
            .registry
            .get(key)
            .ok_or(DiError::NotFound(key.display_name()))?;

        match reg.lifetime {
            Lifetime::Singleton => self.root.resolve_singleton(reg, key),
            Lifetime::Scoped => self.resolve_scoped(reg, key),
            Lifetime::Transient => {
                // Transients built inside a scope see that scope's scoped services
                let ctx = ResolverContext::new(self);
                (reg.ctor)(&ctx)
            }
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.id)
            .field("scoped_slots", &self.scoped_cells.len())
            .finish()
    }
}

impl ResolverCore for Scope {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        self.resolve_any_impl(key)
    }
}

impl Resolver for Scope {}
