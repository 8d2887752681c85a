//! Service key types for the dependency injection container.

use std::any::TypeId;
use std::hash::{Hash, Hasher};

/// Key for service storage and lookup.
///
/// Keys identify a registration by the concrete type or trait it provides,
/// optionally narrowed by a service name. Named keys are how the same
/// implementation is registered several times under different lifetimes.
///
/// # Examples
///
/// ```rust
/// use keyed_orders::{Key, key_of_type, key_of_named};
///
/// let plain = key_of_type::<u32>();
/// let named = key_of_named::<u32>("port");
///
/// assert_ne!(plain, named);
/// assert_eq!(plain.service_name(), None);
/// assert_eq!(named.service_name(), Some("port"));
/// assert_eq!(named.display_name(), "u32");
/// ```
#[derive(Debug, Clone)]
pub enum Key {
    /// Concrete type key with TypeId and name for diagnostics
    Type(TypeId, &'static str),
    /// Named concrete type key with TypeId, typename, and service name
    TypeNamed(TypeId, &'static str, &'static str),
    /// Named trait binding key with trait name and service name
    ///
    /// Unsized trait objects have no `TypeId` to key on, so the trait is keyed by `type_name`.
    TraitNamed(&'static str, &'static str),
}

impl Key {
    /// Get the type or trait name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Key::Type(_, name) => name,
            Key::TypeNamed(_, name, _) => name,
            Key::TraitNamed(name, _) => name,
        }
    }

    /// Get the service name for named services, or None for unnamed services
    pub fn service_name(&self) -> Option<&'static str> {
        match self {
            Key::Type(_, _) => None,
            Key::TypeNamed(_, _, name) => Some(name),
            Key::TraitNamed(_, name) => Some(name),
        }
    }
}

// Type names are diagnostics only; identity is the TypeId
impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Type(a, _), Key::Type(b, _)) => a == b,
            (Key::TypeNamed(a, _, name_a), Key::TypeNamed(b, _, name_b)) => a == b && name_a == name_b,
            (Key::TraitNamed(a, name_a), Key::TraitNamed(b, name_b)) => a == b && name_a == name_b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Key::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            Key::TypeNamed(id, _, name) => {
                1u8.hash(state);
                id.hash(state);
                name.hash(state);
            }
            Key::TraitNamed(name, named) => {
                2u8.hash(state);
                name.hash(state);
                named.hash(state);
            }
        }
    }
}

#[inline]
pub fn key_of_type<T: 'static>() -> Key {
    Key::Type(TypeId::of::<T>(), std::any::type_name::<T>())
}

#[inline]
pub fn key_of_named<T: 'static>(name: &'static str) -> Key {
    Key::TypeNamed(TypeId::of::<T>(), std::any::type_name::<T>(), name)
}

/// Key for a trait object such as `dyn OrderService` registered under `name`.
#[inline]
pub fn key_of_named_trait<T: ?Sized + 'static>(name: &'static str) -> Key {
    Key::TraitNamed(std::any::type_name::<T>(), name)
}
