// HTTP-level tests for the jsoncmp service.
// Requests go through the full router, middleware included, via `oneshot`.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use jsoncmp_api::{router, serve_with_shutdown, AppState};
use jsoncmp_engine::{open_slot_store, Comparator, SlotBackend};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

fn app_with(backend: SlotBackend) -> Router {
    let store = open_slot_store(&backend).unwrap();
    router(AppState::new(Comparator::new(store)))
}

fn memory_app() -> Router {
    app_with(SlotBackend::Memory)
}

fn fs_app(dir: &Path) -> Router {
    app_with(SlotBackend::Fs(dir.to_path_buf()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn store(app: &Router, slot: i64, payload: Value) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/store",
        Some(json!({ "slotNumber": slot, "payload": payload.to_string() })),
    )
    .await
}

// ---------------------------------------------------------------------------
// health / status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health_reports_ok() {
    let app = memory_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_status_reflects_stored_slots() {
    let app = memory_app();

    let (_, before) = send(&app, Method::GET, "/api/status", None).await;
    store(&app, 2, json!({})).await;
    let (status, after) = send(&app, Method::GET, "/api/status", None).await;

    assert_eq!(before, json!({ "slot1": false, "slot2": false, "ready": false }));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, json!({ "slot1": false, "slot2": true, "ready": false }));
}

// ---------------------------------------------------------------------------
// POST /api/store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_store_valid_payload() {
    let app = memory_app();

    let (status, body) = store(&app, 1, json!({ "name": "test" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Payload 1 stored successfully" }));
}

#[tokio::test]
async fn test_store_accepts_legacy_field_names() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/store",
        Some(json!({ "number": 2, "payload_to_compare": "{\"name\":\"test\"}" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payload 2 stored successfully");
}

#[tokio::test]
async fn test_store_rejects_invalid_slot_number() {
    let app = memory_app();

    let (status, body) = store(&app, 3, json!({ "name": "test" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "The slot number must be 1 or 2, got 3" }));
}

#[tokio::test]
async fn test_store_rejects_invalid_json_payload() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/store",
        Some(json!({ "slotNumber": 1, "payload": "invalid-json" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("The payload must be a valid JSON string"));

    let (_, status_body) = send(&app, Method::GET, "/api/status", None).await;
    assert_eq!(status_body["slot1"], false);
}

#[tokio::test]
async fn test_store_rejects_missing_fields() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/store",
        Some(json!({ "payload": "{}" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "The slotNumber field is required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/store",
        Some(json!({ "slotNumber": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "The payload field is required");
}

#[tokio::test]
async fn test_store_rejects_unparseable_body() {
    let app = memory_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/store")
        .header("content-type", "application/json")
        .body(Body::from("slotNumber=1"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request:"));
}

// ---------------------------------------------------------------------------
// /api/compare
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_compare_without_payloads_is_bad_request() {
    let app = memory_app();
    store(&app, 1, json!({ "a": 1 })).await;

    let (status, body) = send(&app, Method::GET, "/api/compare", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Both payloads must be stored before comparison" })
    );
}

#[tokio::test]
async fn test_compare_identical_payloads() {
    let app = memory_app();
    let payload = json!({ "name": "test", "age": 25 });
    store(&app, 1, payload.clone()).await;
    store(&app, 2, payload).await;

    let (status, body) = send(&app, Method::GET, "/api/compare", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "differences": [],
            "message": "Comparison completed and payloads deleted successfully"
        })
    );
}

#[tokio::test]
async fn test_compare_reports_difference_wire_shape() {
    let app = memory_app();
    store(
        &app,
        1,
        json!({ "name": "test", "age": 25, "address": { "city": "Paris" } }),
    )
    .await;
    store(
        &app,
        2,
        json!({ "name": "test2", "address": { "city": "Paris", "zip": "75001" }, "tags": [] }),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/compare", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["differences"],
        json!([
            { "path": "name", "type": "value_mismatch", "value1": "test", "value2": "test2" },
            { "path": "age", "type": "missing_in_second", "value": 25 },
            { "path": "address.zip", "type": "missing_in_first", "value": "75001" },
            { "path": "tags", "type": "missing_in_first", "value": [] }
        ])
    );
}

#[tokio::test]
async fn test_compare_clears_slots_and_repeat_is_rejected() {
    let app = memory_app();
    store(&app, 1, json!([1, 2])).await;
    store(&app, 2, json!([2, 1])).await;

    let (first, body) = send(&app, Method::POST, "/api/compare", None).await;
    let (second, _) = send(&app, Method::GET, "/api/compare", None).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(body["differences"].as_array().unwrap().len(), 2);
    assert_eq!(second, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_compares_yield_one_report() {
    let app = memory_app();
    store(&app, 1, json!({ "a": 1 })).await;
    store(&app, 2, json!({ "a": 2 })).await;

    let (left, right) = tokio::join!(
        send(&app, Method::GET, "/api/compare", None),
        send(&app, Method::GET, "/api/compare", None)
    );

    let mut statuses = vec![left.0.as_u16(), right.0.as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![200, 400]);
}

// ---------------------------------------------------------------------------
// DELETE /api/payloads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_payloads() {
    let app = memory_app();
    store(&app, 1, json!(1)).await;
    store(&app, 2, json!(2)).await;

    let (status, body) = send(&app, Method::DELETE, "/api/payloads", None).await;
    let (_, status_body) = send(&app, Method::GET, "/api/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Payloads deleted successfully" }));
    assert_eq!(status_body["ready"], false);
}

// ---------------------------------------------------------------------------
// storage failures and request ids
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_fs_backend_storage_failure_is_server_error() {
    let dir = TempDir::new().unwrap();
    let app = fs_app(dir.path());
    store(&app, 1, json!({ "a": 1 })).await;
    store(&app, 2, json!({ "a": 1 })).await;
    std::fs::write(dir.path().join("payload_1.json"), "{ truncated").unwrap();

    let (status, body) = send(&app, Method::GET, "/api/compare", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("not valid JSON"));
}

#[tokio::test]
async fn test_fs_backend_writes_pretty_payload_files() {
    let dir = TempDir::new().unwrap();
    let app = fs_app(dir.path());

    store(&app, 1, json!({ "name": "test" })).await;

    let text = std::fs::read_to_string(dir.path().join("payload_1.json")).unwrap();
    assert_eq!(text, "{\n  \"name\": \"test\"\n}");
}

#[tokio::test]
async fn test_request_id_is_echoed_or_generated() {
    let app = memory_app();

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "client-supplied-7")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "client-supplied-7");

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = memory_app();

    let (status, _) = send(&app, Method::GET, "/api/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_serves_over_tcp_until_shutdown() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let store = open_slot_store(&SlotBackend::Memory).unwrap();
    let state = AppState::new(Comparator::new(store));
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(serve_with_shutdown(listener, state, async move {
        let _ = stop_rx.await;
    }));

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 200 OK"));
    assert!(raw.ends_with(r#"{"status":"ok"}"#));

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
