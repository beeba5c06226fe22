use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use base64::Engine as _;
use serde_json::Value;
use server::db::AppState;
use tower::ServiceExt;

/// Build a test router over fresh in-memory cabin and image stores.
///
/// Each call gets its own state, so tests never see each other's data.
pub fn test_app() -> (Router, AppState) {
    let state = AppState::in_memory();
    let router = server::openapi::api_router(state.clone());
    (router, state)
}

/// A valid create-cabin body with a small fake JPEG attached.
pub fn cabin_body(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "max_capacity": 2,
        "regular_price": 250.0,
        "discount": 25.0,
        "description": "Small cabin in the woods",
        "image": {
            "file_name": format!("cabin-{name}.jpg"),
            "content_type": "image/jpeg",
            "data": base64::engine::general_purpose::STANDARD.encode(b"\xff\xd8\xff fake jpeg"),
        }
    })
}

/// Create a cabin and return the response body, asserting it was created.
pub async fn create_cabin(app: &Router, name: &str) -> Value {
    let (status, body) = post_json(app, "/api/cabins", &cabin_body(name).to_string()).await;
    assert_eq!(status, StatusCode::CREATED, "create {name} failed: {body}");
    body
}

/// POST JSON to a route.
pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, req).await
}

/// GET a route.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// DELETE a route.
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// Send a request through the router and parse the response.
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body_bytes) = send_raw(app, req).await;

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    };

    (status, body)
}

/// Send a request and return raw bytes + status + headers (for image responses).
pub async fn send_raw(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    (status, headers, body_bytes.to_vec())
}
