//! Error types for the dependency injection container.

use thiserror::Error;

/// Dependency injection errors
///
/// Construction of a registered service never fails on its own; these errors
/// describe lookups that cannot be satisfied.
///
/// # Examples
///
/// ```rust
/// use keyed_orders::{DiError, ServiceCollection, Resolver};
///
/// let provider = ServiceCollection::new().build();
/// match provider.get::<String>() {
///     Err(DiError::NotFound(type_name)) => assert_eq!(type_name, "alloc::string::String"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum DiError {
    /// Service not registered
    #[error("Service not found: {0}")]
    NotFound(&'static str),
    /// Type downcast failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(&'static str),
    /// Invalid lifetime resolution (e.g., scoped from root)
    #[error("Lifetime error: {0}")]
    WrongLifetime(&'static str),
    /// A lifetime key that names none of the three lifetimes
    #[error("Unknown lifetime: {0}")]
    UnknownLifetime(String),
}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;
