use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn test_list_cabins_empty() {
    let (app, _state) = common::test_app();

    let (status, response) = common::get(&app, "/api/cabins").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, serde_json::json!([]));
}

#[tokio::test]
async fn test_list_cabins_in_creation_order() {
    let (app, _state) = common::test_app();

    common::create_cabin(&app, "001").await;
    common::create_cabin(&app, "002").await;
    common::create_cabin(&app, "003").await;

    let (status, response) = common::get(&app, "/api/cabins").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = response
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["001", "002", "003"]);
}
