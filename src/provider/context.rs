//! Resolver context handed to factory functions.

use std::any::Any;
use std::sync::Arc;

use crate::traits::{Resolver, ResolverCore};
use crate::{DiResult, Key};

/// Context passed to factory functions for resolving dependencies.
///
/// Wraps whichever resolver is constructing the service (the root provider or
/// a scope), so a scoped factory sees the scoped instances of its own scope.
///
/// # Examples
///
/// ```
/// use keyed_orders::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct Clock { offset: i64 }
/// struct Stamp { clock: Arc<Clock> }
///
/// let mut services = ServiceCollection::new();
/// services.add_singleton(Clock { offset: 2 });
/// services.add_transient_factory::<Stamp, _>(|resolver| Stamp {
///     clock: resolver.get_required::<Clock>(),
/// });
///
/// let provider = services.build();
/// assert_eq!(provider.get_required::<Stamp>().clock.offset, 2);
/// ```
pub struct ResolverContext<'a> {
    resolver: &'a dyn ResolverCore,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn new<T>(resolver: &'a T) -> Self
    where
        T: ResolverCore,
    {
        Self { resolver }
    }
}

impl<'a> ResolverCore for ResolverContext<'a> {
    fn resolve_any(&self, key: &Key) -> DiResult<Arc<dyn Any + Send + Sync>> {
        self.resolver.resolve_any(key)
    }
}

impl<'a> Resolver for ResolverContext<'a> {}
