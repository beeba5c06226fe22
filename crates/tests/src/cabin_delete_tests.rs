use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn test_delete_cabin_success() {
    let (app, state) = common::test_app();

    let created = common::create_cabin(&app, "001").await;
    let id = created["id"].as_i64().unwrap();

    let (status, response) = common::delete(&app, &format!("/api/cabins/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(response, serde_json::Value::Null);

    let (_, list) = common::get(&app, "/api/cabins").await;
    assert_eq!(list.as_array().unwrap().len(), 0);
    assert!(
        state.images.as_memory().unwrap().is_empty(),
        "deleting a cabin should remove its photo"
    );
}

#[tokio::test]
async fn test_delete_cabin_not_found() {
    let (app, _state) = common::test_app();

    let (status, response) = common::delete(&app, "/api/cabins/9999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["message"], "Cabin not found");
}

#[tokio::test]
async fn test_delete_cabin_twice() {
    let (app, _state) = common::test_app();

    let created = common::create_cabin(&app, "001").await;
    let uri = format!("/api/cabins/{}", created["id"]);

    let (first, _) = common::delete(&app, &uri).await;
    let (second, _) = common::delete(&app, &uri).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NOT_FOUND);
}
