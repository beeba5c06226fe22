use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn test_health_reports_memory_store() {
    let (app, _state) = common::test_app();

    let (status, response) = common::get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ok");
    assert_eq!(response["db"], "memory");
    assert!(response["version"].as_str().is_some());
}

#[tokio::test]
async fn test_docs_are_served() {
    let (app, _state) = common::test_app();

    let (status, _) = common::get(&app, "/docs").await;

    assert_eq!(status, StatusCode::OK);
}
