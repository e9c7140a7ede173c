use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use balcao_client::{ClientConfig, DetailState, FetchError, OrderApiClient, OrderDetailsResource, Session};
use balcao_core::OrderId;
use balcao_display::format_brl;
use balcao_orders::OrderStatus;

const TOKEN: &str = "partner-token";

/// Stub upstream orders API bound to an ephemeral port.
struct StubUpstream {
    base_url: String,
    hits: Arc<AtomicUsize>,
    handle: tokio::task::JoinHandle<()>,
}

impl StubUpstream {
    async fn spawn() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/health", get(|| async { StatusCode::OK }))
            .route("/orders/:id", get(serve_order))
            .with_state(Arc::clone(&hits));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            hits,
            handle,
        }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn resource(&self) -> OrderDetailsResource {
        self.resource_with_token(TOKEN)
    }

    fn resource_with_token(&self, token: &str) -> OrderDetailsResource {
        let session = Session::new(token).expect("failed to build session");
        let config = ClientConfig::new(&self.base_url);
        OrderDetailsResource::new(OrderApiClient::new(config, session))
    }
}

impl Drop for StubUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_order(
    State(hits): State<Arc<AtomicUsize>>,
    Path(order_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {TOKEN}"))
        .unwrap_or(false);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "missing or invalid token").into_response();
    }

    match order_id.as_str() {
        "order-77" => Json(order_payload("order-77")).into_response(),
        "order-slow" => {
            tokio::time::sleep(Duration::from_millis(150)).await;
            Json(order_payload("order-slow")).into_response()
        }
        "order-broken" => (StatusCode::OK, "{ not json").into_response(),
        _ => (StatusCode::NOT_FOUND, "no such order").into_response(),
    }
}

fn order_payload(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "status": "delivering",
        "customer": {
            "name": "Leonardo Neves Duarte",
            "phone": null,
            "email": "leonardo@example.com"
        },
        "createdAt": "2025-11-02T18:30:00Z",
        "orderItems": [
            { "id": "item-1", "product": { "name": "Mussarela" }, "priceInCents": "45,00", "quantity": 2 },
            { "id": "item-2", "name": "Refrigerante lata", "unitPriceInCents": 600, "quantity": 3 },
            { "id": "item-3", "price": { "value": "1200" }, "quantity": 1 }
        ],
        "total": "150.00"
    })
}

#[tokio::test]
async fn order_detail_is_normalized_end_to_end() {
    let srv = StubUpstream::spawn().await;
    let resource = srv.resource();
    let order_id = OrderId::new("order-77");

    let order = resource.activate(&order_id).await.unwrap();

    assert_eq!(order.id, "order-77");
    assert_eq!(order.status, OrderStatus::Delivering);
    assert_eq!(order.customer.name, "Leonardo Neves Duarte");
    assert_eq!(order.created_at.to_rfc3339(), "2025-11-02T18:30:00+00:00");

    // Decimal string price, integer cents and a wrapped digit string all
    // land on exact cents.
    assert_eq!(order.items[0].unit_price.cents(), 4500);
    assert_eq!(order.items[0].subtotal.cents(), 9000);
    assert_eq!(format_brl(order.items[0].subtotal), "R$ 90,00");
    assert_eq!(order.items[1].subtotal.cents(), 1800);
    assert_eq!(order.items[2].unit_price.cents(), 1200);
    assert_eq!(order.items[2].name, "—");

    assert_eq!(order.total.cents(), 15_000);
    assert_eq!(format_brl(order.total), "R$ 150,00");
    // The payload total and the computed sum both stay available.
    assert_eq!(order.items_subtotal().cents(), 12_000);
}

#[tokio::test]
async fn nothing_is_fetched_until_activation() {
    let srv = StubUpstream::spawn().await;
    let resource = srv.resource();
    let order_id = OrderId::new("order-77");

    assert_eq!(resource.state(&order_id).await, DetailState::Inactive);
    assert_eq!(resource.peek(&order_id).await, None);
    assert_eq!(srv.hits(), 0);

    resource.activate(&order_id).await.unwrap();

    assert_eq!(resource.state(&order_id).await, DetailState::Ready);
    assert!(resource.peek(&order_id).await.is_some());
    assert_eq!(srv.hits(), 1);
}

#[tokio::test]
async fn concurrent_activations_share_one_request() {
    let srv = StubUpstream::spawn().await;
    let resource = srv.resource();
    let order_id = OrderId::new("order-slow");

    let (first, second) = tokio::join!(
        resource.activate(&order_id),
        resource.activate(&order_id),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first, second);
    assert_eq!(srv.hits(), 1);
}

#[tokio::test]
async fn reactivation_serves_the_cache() {
    let srv = StubUpstream::spawn().await;
    let resource = srv.resource();
    let order_id = OrderId::new("order-77");

    resource.activate(&order_id).await.unwrap();
    assert_eq!(srv.hits(), 1);

    resource.deactivate(&order_id).await;
    // Hidden while inactive, but not forgotten.
    assert_eq!(resource.state(&order_id).await, DetailState::Inactive);
    assert_eq!(resource.peek(&order_id).await, None);

    let order = resource.activate(&order_id).await.unwrap();
    assert_eq!(order.id, "order-77");
    assert_eq!(resource.state(&order_id).await, DetailState::Ready);
    assert_eq!(srv.hits(), 1);
}

#[tokio::test]
async fn invalidate_forces_a_refetch() {
    let srv = StubUpstream::spawn().await;
    let resource = srv.resource();
    let order_id = OrderId::new("order-77");

    resource.activate(&order_id).await.unwrap();
    resource.invalidate(&order_id).await;
    assert_eq!(resource.state(&order_id).await, DetailState::Loading);

    resource.activate(&order_id).await.unwrap();
    assert_eq!(srv.hits(), 2);
}

#[tokio::test]
async fn missing_orders_surface_api_errors_and_are_retried() {
    let srv = StubUpstream::spawn().await;
    let resource = srv.resource();
    let order_id = OrderId::new("order-missing");

    let err = resource.activate(&order_id).await.unwrap_err();
    match err {
        FetchError::Api(404, body) => assert_eq!(body, "no such order"),
        other => panic!("expected a 404 API error, got {other:?}"),
    }

    // Failures are not cached; the next activation hits the API again.
    let err = resource.activate(&order_id).await.unwrap_err();
    assert!(matches!(err, FetchError::Api(404, _)));
    assert_eq!(srv.hits(), 2);
}

#[tokio::test]
async fn malformed_payloads_surface_decode_errors() {
    let srv = StubUpstream::spawn().await;
    let resource = srv.resource();
    let order_id = OrderId::new("order-broken");

    let err = resource.activate(&order_id).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn requests_carry_the_session_bearer_token() {
    let srv = StubUpstream::spawn().await;
    let order_id = OrderId::new("order-77");

    let err = srv
        .resource_with_token("not-the-right-token")
        .activate(&order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Api(401, _)));

    srv.resource().activate(&order_id).await.unwrap();
}

#[tokio::test]
async fn unreachable_upstream_surfaces_network_errors() {
    // Nothing listens on this port.
    let session = Session::new(TOKEN).unwrap();
    let config = ClientConfig::new("http://127.0.0.1:9");
    let resource = OrderDetailsResource::new(OrderApiClient::new(config, session));
    let order_id = OrderId::new("order-77");

    let err = resource.activate(&order_id).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}

#[tokio::test]
async fn health_check_reflects_reachability() {
    let srv = StubUpstream::spawn().await;

    let session = Session::new(TOKEN).unwrap();
    let live = OrderApiClient::new(ClientConfig::new(&srv.base_url), session);
    assert!(live.health().await);

    let session = Session::new(TOKEN).unwrap();
    let dead = OrderApiClient::new(ClientConfig::new("http://127.0.0.1:9"), session);
    assert!(!dead.health().await);
}
