use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use tx_demo::account::{FaultPoint, MemoryAccountStore};
use tx_demo::gateway::{AppState, create_app};

fn app_with(store: MemoryAccountStore) -> Router {
    create_app(Arc::new(AppState::new(Arc::new(store))))
}

async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn transfer_body(from: i64, to: i64, amount: i64, atomic: bool) -> Value {
    json!({"fromId": from, "toId": to, "amount": amount, "useTransaction": atomic})
}

#[tokio::test]
async fn test_atomic_transfer_from_baseline() {
    let app = app_with(MemoryAccountStore::with_baseline());
    let body = transfer_body(1, 2, 500, true);
    let (status, report) = call(app, "POST", "/transfer", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["statements"], json!(["withdraw 500 from 1", "deposit 500 to 2"]));
    assert_eq!(
        report["afterState"],
        json!([{"id": 1, "balance": 500}, {"id": 2, "balance": 1500}])
    );
    assert!(report["error"].is_null());
    assert_eq!(report["useTransaction"], true);
}

#[tokio::test]
async fn test_missing_account_is_200_with_error() {
    let app = app_with(MemoryAccountStore::with_baseline());
    let body = transfer_body(1, 99, 500, true);
    let (status, report) = call(app, "POST", "/transfer", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["error"], "AccountNotFound(99)");
    assert_eq!(report["afterState"], report["beforeState"]);
}

#[tokio::test]
async fn test_non_atomic_insufficient_funds() {
    let app = app_with(MemoryAccountStore::with_baseline());
    let body = transfer_body(1, 2, 2000, false);
    let (status, report) = call(app, "POST", "/api/transfer", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["statements"][0], "deposit 2000 to 2");
    assert_eq!(report["statements"][1], "withdraw 2000 from 1");
    assert_eq!(
        report["afterState"],
        json!([{"id": 1, "balance": -1000}, {"id": 2, "balance": 3000}])
    );
    assert!(report["error"].is_null());
}

#[tokio::test]
async fn test_malformed_input_is_400() {
    let bodies = [
        json!({"fromId": 1, "toId": 2, "amount": 0, "useTransaction": true}),
        json!({"fromId": 1, "toId": 2, "amount": -3, "useTransaction": true}),
        json!({"fromId": 1, "toId": 2, "amount": "100", "useTransaction": true}),
        json!({"fromId": 1, "toId": 2, "amount": 1.5, "useTransaction": true}),
        json!({"fromId": "one", "toId": 2, "amount": 10}),
        json!({"toId": 2, "amount": 10}),
    ];

    for body in bodies {
        let store = MemoryAccountStore::with_baseline();
        let app = app_with(store.clone());
        let (status, err) = call(app, "POST", "/transfer", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(err["error"], "INVALID_PARAMETER");
        assert_eq!(store.snapshot()[0].balance, 1000);
    }
}

#[tokio::test]
async fn test_unparsable_json_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/transfer")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app_with(MemoryAccountStore::with_baseline())
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_unavailable_is_500() {
    let store = MemoryAccountStore::with_baseline();
    store.inject_fault(FaultPoint::Acquire);
    let body = transfer_body(1, 2, 10, true);
    let (status, err) = call(app_with(store), "POST", "/transfer", Some(body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err["message"].as_str().unwrap().starts_with("system error: "));
}

#[tokio::test]
async fn test_reset_restores_baseline() {
    let store = MemoryAccountStore::with_baseline();
    let app = app_with(store.clone());
    call(app.clone(), "POST", "/transfer", Some(transfer_body(1, 2, 700, false))).await;

    let (status, first) = call(app.clone(), "POST", "/reset", None).await;
    let (_, second) = call(app.clone(), "POST", "/reset", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);
    assert_eq!(
        first["accounts"],
        json!([{"id": 1, "balance": 1000}, {"id": 2, "balance": 1000}])
    );
    assert_eq!(first["accounts"], second["accounts"]);

    let (_, accounts) = call(app, "GET", "/accounts", None).await;
    assert_eq!(accounts, first["accounts"]);
}

#[tokio::test]
async fn test_reset_failure_is_500() {
    let store = MemoryAccountStore::with_baseline();
    store.inject_fault(FaultPoint::Reset);
    let (status, body) = call(app_with(store), "POST", "/reset", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_health() {
    let app = app_with(MemoryAccountStore::with_baseline());
    let (status, body) = call(app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");

    let store = MemoryAccountStore::with_baseline();
    store.inject_fault(FaultPoint::GetAll);
    let (status, body) = call(app_with(store), "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
}
