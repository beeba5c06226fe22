use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn test_created_cabin_photo_is_served() {
    let (app, _state) = common::test_app();

    let created = common::create_cabin(&app, "001").await;
    let url = created["image"].as_str().unwrap();

    let req = Request::builder()
        .method("GET")
        .uri(url)
        .body(Body::empty())
        .unwrap();
    let (status, headers, bytes) = common::send_raw(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(bytes, b"\xff\xd8\xff fake jpeg".to_vec());
}

#[tokio::test]
async fn test_unknown_photo_is_not_found() {
    let (app, _state) = common::test_app();

    let (status, response) = common::get(&app, "/api/cabin-images/missing.jpg").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["message"], "Image not found");
}

#[tokio::test]
async fn test_photo_with_url_special_characters_is_served() {
    let (app, _state) = common::test_app();

    let mut body = common::cabin_body("010");
    body["image"]["file_name"] = "cabin#9?v=2 caf\u{e9}%.jpg".into();

    let (status, created) = common::post_json(&app, "/api/cabins", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);

    let url = created["image"].as_str().unwrap();
    assert!(
        !url.contains(['#', '?', '%', ' ']),
        "photo URL should not need encoding: {url}"
    );

    let req = Request::builder()
        .method("GET")
        .uri(url)
        .body(Body::empty())
        .unwrap();
    let (status, _, bytes) = common::send_raw(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"\xff\xd8\xff fake jpeg".to_vec());
}
