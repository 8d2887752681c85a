//! Order route definitions

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use super::{create_app_with_di, ApiResult, DiScope};
use crate::orders::{InstanceId, NewOrder, Order, OrderRegistry};
use crate::{Lifetime, ServiceProvider};

/// Body of `GET /`.
pub const STATUS_MESSAGE: &str =
    "Orders API is running. Try GET /api/orders/transient, /api/orders/scoped or /api/orders/singleton.";

/// Listing of one resolved store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersResponse {
    pub cycle: String,
    pub instance_id: InstanceId,
    pub count: usize,
    pub orders: Vec<Order>,
}

/// Acknowledgement of an accepted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAdded {
    pub message: String,
    pub total: usize,
}

/// The full application: order routes, request scopes and request tracing.
pub fn app(provider: Arc<ServiceProvider>) -> Router {
    create_app_with_di(provider, |router| {
        router
            .route("/", get(status))
            .route("/api/orders/:lifecycle", get(list_orders).post(add_order))
    })
    .layer(TraceLayer::new_for_http())
}

async fn status() -> &'static str {
    STATUS_MESSAGE
}

// Each handler resolves its store once, so a transient store lives exactly as
// long as the handler call.
async fn list_orders(scope: DiScope, Path(lifecycle): Path<String>) -> ApiResult<Json<OrdersResponse>> {
    let lifetime: Lifetime = lifecycle.parse()?;
    let store = OrderRegistry::resolve(scope.scope(), lifetime)?;

    Ok(Json(OrdersResponse {
        cycle: lifetime.display_name().to_string(),
        instance_id: store.instance_id(),
        count: store.orders_count(),
        orders: store.orders(),
    }))
}

async fn add_order(
    scope: DiScope,
    Path(lifecycle): Path<String>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> ApiResult<Json<OrderAdded>> {
    let lifetime: Lifetime = lifecycle.parse()?;
    let Json(order) = payload?;
    let store = OrderRegistry::resolve(scope.scope(), lifetime)?;

    let added = store.add_order(order);
    tracing::info!(
        lifetime = lifetime.as_str(),
        instance = %store.instance_id(),
        id = added.id,
        product = %added.product_name,
        "order added"
    );

    Ok(Json(OrderAdded {
        message: format!("Added to {}", lifetime.display_name()),
        total: store.orders_count(),
    }))
}
