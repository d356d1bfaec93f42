//! HTTP surface tests
//!
//! Exercises the axum router end to end with in-process requests:
//! DTO validation, status codes, and the structured error bodies the
//! presentation layer depends on.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use placement_server::{Config, ServerState, api};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let state = ServerState::initialize(&Config::default());
    api::router().with_state(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn checkout_body() -> Value {
    json!({
        "merchant_id": "merchant-9",
        "scope": "HOME",
        "neighborhoods": ["centro", "jardins", "liberdade"],
        "duration_tier": "ONE_MONTH",
        "kind": "STANDARD_PLACEMENT",
        "payment_method": "PIX",
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app();
    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_quote_endpoint_prices_the_example() {
    let app = app();
    let (status, body) = send(
        &app,
        get("/api/quotes?scope=HOME&neighborhoods=3&duration=ONE_MONTH"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3600);
    assert_eq!(body["multiplier"], 1.2);
}

#[tokio::test]
async fn test_quote_discloses_promo_savings() {
    let app = app();
    let (status, body) = send(
        &app,
        get("/api/quotes?scope=HOME&neighborhoods=3&duration=THREE_MONTH_PROMO"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_price"], 10800);
    assert_eq!(body["total"], 8100);
    assert_eq!(body["savings"], 2700);
    assert_eq!(body["savings_percent"], 25.0);
}

#[tokio::test]
async fn test_quote_with_zero_neighborhoods_is_invalid_config() {
    let app = app();
    let (status, body) = send(
        &app,
        get("/api/quotes?scope=HOME&neighborhoods=0&duration=ONE_MONTH"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_CONFIG");
    assert_eq!(body["field"], "neighborhoods");
}

#[tokio::test]
async fn test_checkout_then_fetch_order() {
    let app = app();
    let (status, order) = send(&app, post("/api/orders", checkout_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["total_amount"], 3600);
    assert_eq!(order["status"], "UNDER_REVIEW");
    assert_eq!(order["payment_status"], "PAID");

    let id = order["id"].as_str().unwrap();
    let (status, fetched) = send(&app, get(&format!("/api/orders/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], order["id"]);

    let (status, thread) = send(&app, get(&format!("/api/orders/{id}/messages"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(thread.as_array().unwrap().len(), 1);
    assert_eq!(thread[0]["sender"], "SYSTEM");
}

#[tokio::test]
async fn test_checkout_with_no_neighborhoods_is_rejected() {
    let app = app();
    let mut body = checkout_body();
    body["neighborhoods"] = json!([]);
    let (status, error) = send(&app, post("/api/orders", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PAYLOAD");
    assert_eq!(error["field"], "neighborhoods");
}

#[tokio::test]
async fn test_skipping_a_stage_reports_both_states() {
    let app = app();
    let (_, order) = send(&app, post("/api/orders", checkout_body())).await;
    let id = order["id"].as_str().unwrap();

    let (status, error) = send(
        &app,
        post(
            &format!("/api/orders/{id}/advance"),
            json!({"status": "APPROVED"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "INVALID_TRANSITION");
    assert_eq!(error["current"], "UNDER_REVIEW");
    assert_eq!(error["requested"], "APPROVED");
    assert_eq!(error["retryable"], false);
}

#[tokio::test]
async fn test_unknown_order_is_404() {
    let app = app();
    let (status, body) = send(&app, get("/api/orders/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_system_sender_cannot_be_injected() {
    let app = app();
    let (_, order) = send(&app, post("/api/orders", checkout_body())).await;
    let id = order["id"].as_str().unwrap();

    let (status, error) = send(
        &app,
        post(
            &format!("/api/orders/{id}/messages"),
            json!({"sender": "SYSTEM", "body": "fake confirmation"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PAYLOAD");
    assert_eq!(error["field"], "sender");
}

#[tokio::test]
async fn test_support_reply_via_messages_endpoint() {
    let app = app();
    let (_, order) = send(&app, post("/api/orders", checkout_body())).await;
    let id = order["id"].as_str().unwrap();

    let (status, message) = send(
        &app,
        post(
            &format!("/api/orders/{id}/messages"),
            json!({"sender": "SUPPORT_TEAM", "body": "Reviewing your creative now."}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["sequence"], 2);
    assert_eq!(message["kind"], "TEXT");
}
