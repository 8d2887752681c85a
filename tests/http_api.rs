/// HTTP surface tests driven through the router with `oneshot`

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use keyed_orders::web::{app, OrderAdded, OrdersResponse, STATUS_MESSAGE};
use keyed_orders::{OrderRegistry, ServiceCollection};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    let mut services = ServiceCollection::new();
    OrderRegistry::register(&mut services);
    app(Arc::new(services.build()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_orders(app: &Router, lifecycle: &str) -> OrdersResponse {
    let request = Request::get(format!("/api/orders/{lifecycle}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

async fn post_order(app: &Router, lifecycle: &str, body: Value) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/orders/{lifecycle}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn root_reports_status() {
    let app = test_app();
    let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), STATUS_MESSAGE);
}

#[tokio::test]
async fn singleton_accumulates_orders_across_requests() {
    let app = test_app();
    let before = get_orders(&app, "singleton").await;
    assert_eq!(before.count, 0);

    let (status, body) = post_order(&app, "singleton", json!({"productName": "Widget", "quantity": 3})).await;
    assert_eq!(status, StatusCode::OK);
    let added: OrderAdded = serde_json::from_slice(&body).unwrap();
    assert_eq!(added.message, "Added to Singleton");
    assert_eq!(added.total, 1);

    let (status, _) = post_order(&app, "singleton", json!({"productName": "Gadget", "quantity": 1})).await;
    assert_eq!(status, StatusCode::OK);

    let listing = get_orders(&app, "singleton").await;
    assert_eq!(listing.cycle, "Singleton");
    assert_eq!(listing.count, 2);
    assert_eq!(listing.instance_id, before.instance_id);

    let summary: Vec<_> = listing
        .orders
        .iter()
        .map(|o| (o.id, o.product_name.as_str(), o.quantity))
        .collect();
    assert_eq!(summary, vec![(1, "Widget", 3), (2, "Gadget", 1)]);
}

#[tokio::test]
async fn scoped_store_is_fresh_for_every_request() {
    let app = test_app();

    let (_, body) = post_order(&app, "scoped", json!({"productName": "Widget", "quantity": 3})).await;
    let added: OrderAdded = serde_json::from_slice(&body).unwrap();
    assert_eq!(added.message, "Added to Scoped");
    assert_eq!(added.total, 1);

    let first = get_orders(&app, "scoped").await;
    let second = get_orders(&app, "scoped").await;

    assert_eq!(first.cycle, "Scoped");
    assert_eq!(first.count, 0);
    assert_ne!(first.instance_id, second.instance_id);
}

#[tokio::test]
async fn transient_store_never_keeps_orders() {
    let app = test_app();

    let (_, body) = post_order(&app, "transient", json!({"productName": "Widget", "quantity": 3})).await;
    let added: OrderAdded = serde_json::from_slice(&body).unwrap();
    assert_eq!(added.message, "Added to Transient");
    assert_eq!(added.total, 1);

    let (_, body) = post_order(&app, "transient", json!({"productName": "Gadget", "quantity": 1})).await;
    let added: OrderAdded = serde_json::from_slice(&body).unwrap();
    assert_eq!(added.total, 1);

    let first = get_orders(&app, "transient").await;
    let second = get_orders(&app, "transient").await;
    assert_eq!(first.count, 0);
    assert!(first.orders.is_empty());
    assert_ne!(first.instance_id, second.instance_id);
}

#[tokio::test]
async fn lifetimes_do_not_share_orders() {
    let app = test_app();
    post_order(&app, "singleton", json!({"productName": "Widget", "quantity": 3})).await;

    assert_eq!(get_orders(&app, "singleton").await.count, 1);
    assert_eq!(get_orders(&app, "scoped").await.count, 0);
    assert_eq!(get_orders(&app, "transient").await.count, 0);
}

#[tokio::test]
async fn order_json_shape() {
    let app = test_app();
    post_order(
        &app,
        "singleton",
        json!({"id": 77, "productName": "Widget", "quantity": 3, "date": "2024-05-01T12:30:00Z"}),
    )
    .await;

    let request = Request::get("/api/orders/singleton").body(Body::empty()).unwrap();
    let (_, body) = send(&app, request).await;
    let value: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(value["cycle"], "Singleton");
    assert_eq!(value["count"], 1);
    assert!(value["instanceId"].is_string());
    assert_eq!(
        value["orders"][0],
        json!({"id": 1, "productName": "Widget", "quantity": 3, "date": "2024-05-01T12:30:00Z"})
    );
}

#[tokio::test]
async fn unknown_lifecycle_is_not_found() {
    let app = test_app();

    let (status, body) = send(&app, Request::get("/api/orders/hourly").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["error"]["type"], "not_found");

    let (status, _) = post_order(&app, "hourly", json!({"productName": "Widget", "quantity": 3})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = test_app();

    let (status, body) = post_order(&app, "singleton", json!({"productName": "Widget"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["error"]["type"], "bad_request");

    let (status, _) = post_order(&app, "singleton", json!({"productName": "Widget", "quantity": "lots"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/orders/singleton")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/orders/singleton")
        .body(Body::from(json!({"productName": "Widget", "quantity": 3}).to_string()))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was stored by the rejected requests
    assert_eq!(get_orders(&app, "singleton").await.count, 0);
}
