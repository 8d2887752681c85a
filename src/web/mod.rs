//! Axum integration and the order HTTP surface.
//!
//! - [`DiScope`] gives every request its own [`Scope`], which is the unit of
//!   work scoped services live for
//! - [`create_app_with_di`] makes the root provider available to that extractor
//! - [`routes`] holds the order endpoints

mod error;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use routes::{app, OrderAdded, OrdersResponse, STATUS_MESSAGE};

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Extension, Router,
};

use crate::{Scope, ServiceProvider};

/// Extractor for the request-scoped DI container.
///
/// A new scope is created for each request and dropped with it, so scoped
/// services are shared by everything one handler resolves and by nothing else.
pub struct DiScope {
    scope: Scope,
}

impl DiScope {
    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DiScope
where
    S: Send + Sync,
{
    type Rejection = DiRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let provider = parts
            .extensions
            .get::<Arc<ServiceProvider>>()
            .ok_or_else(|| {
                DiRejection::Configuration(
                    "ServiceProvider not found in extensions. Make sure to use create_app_with_di()".to_string(),
                )
            })?;

        let scope = provider.create_scope();
        tracing::debug!(scope = %scope.id(), method = %parts.method, path = %parts.uri.path(), "request scope opened");
        Ok(DiScope { scope })
    }
}

/// Rejection type for DI extraction failures
#[derive(Debug)]
pub enum DiRejection {
    Configuration(String),
}

impl IntoResponse for DiRejection {
    fn into_response(self) -> Response {
        match self {
            DiRejection::Configuration(msg) => {
                tracing::error!(%msg, "DI extraction failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
            }
        }
    }
}

/// Builds a router whose handlers can extract [`DiScope`].
pub fn create_app_with_di<F>(provider: Arc<ServiceProvider>, configure: F) -> Router
where
    F: FnOnce(Router) -> Router,
{
    configure(Router::new()).layer(Extension(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Resolver, ServiceCollection};

    #[tokio::test]
    async fn extracts_a_fresh_scope_per_request() {
        struct RequestTag;

        let mut services = ServiceCollection::new();
        services.add_scoped_factory::<RequestTag, _>(|_| RequestTag);
        let provider = Arc::new(services.build());

        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        parts.extensions.insert(provider.clone());

        let first = DiScope::from_request_parts(&mut parts, &()).await.unwrap();
        let second = DiScope::from_request_parts(&mut parts, &()).await.unwrap();

        assert_ne!(first.scope().id(), second.scope().id());
        assert!(!Arc::ptr_eq(
            &first.scope().get_required::<RequestTag>(),
            &second.scope().get_required::<RequestTag>(),
        ));
    }

    #[tokio::test]
    async fn missing_provider_is_a_configuration_error() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        let rejection = DiScope::from_request_parts(&mut parts, &()).await.err().unwrap();

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
