//! Service lifetime definitions.

use std::fmt;
use std::str::FromStr;

use crate::error::DiError;

/// Service lifetimes controlling when an instance is constructed and when it is reused.
///
/// Each lifetime doubles as the routing key of the order endpoints, so
/// `Lifetime::Scoped.as_str()` is both the name the store is registered under
/// and the `{lifecycle}` segment of `/api/orders/{lifecycle}`.
///
/// # Examples
///
/// ```rust
/// use keyed_orders::{ServiceCollection, Resolver, Lifetime};
/// use std::sync::Arc;
///
/// struct Catalog;
/// struct Basket;
/// struct Receipt;
///
/// let mut services = ServiceCollection::new();
/// services.add_factory(Lifetime::Singleton, |_| Catalog);
/// services.add_factory(Lifetime::Scoped, |_| Basket);
/// services.add_factory(Lifetime::Transient, |_| Receipt);
///
/// let provider = services.build();
/// let scope = provider.create_scope();
///
/// // Singleton: same instance from the root and from any scope
/// assert!(Arc::ptr_eq(&provider.get_required::<Catalog>(), &scope.get_required::<Catalog>()));
///
/// // Scoped: same within one scope, different across scopes
/// assert!(Arc::ptr_eq(&scope.get_required::<Basket>(), &scope.get_required::<Basket>()));
/// let other = provider.create_scope();
/// assert!(!Arc::ptr_eq(&scope.get_required::<Basket>(), &other.get_required::<Basket>()));
///
/// // Transient: always new
/// assert!(!Arc::ptr_eq(&scope.get_required::<Receipt>(), &scope.get_required::<Receipt>()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// Single instance per root provider, constructed on first resolution and cached
    /// for the lifetime of the process.
    Singleton,
    /// Single instance per scope, constructed on first resolution within that scope.
    Scoped,
    /// New instance per resolution, never cached.
    Transient,
}

impl Lifetime {
    /// Every lifetime, in registration order.
    pub const ALL: [Lifetime; 3] = [Lifetime::Transient, Lifetime::Scoped, Lifetime::Singleton];

    /// Lowercase key used for keyed registrations and URL segments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Singleton => "singleton",
            Lifetime::Scoped => "scoped",
            Lifetime::Transient => "transient",
        }
    }

    /// Capitalized label reported as the `cycle` of an order listing.
    pub fn display_name(&self) -> &'static str {
        match self {
            Lifetime::Singleton => "Singleton",
            Lifetime::Scoped => "Scoped",
            Lifetime::Transient => "Transient",
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Lifetime {
    type Err = DiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lifetime::ALL
            .into_iter()
            .find(|lifetime| lifetime.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DiError::UnknownLifetime(s.to_string()))
    }
}
