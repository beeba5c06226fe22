use axum::http::StatusCode;
use base64::Engine as _;
use pretty_assertions::assert_eq;
use shared_types::{
    CAPACITY_MIN_MESSAGE, DISCOUNT_MESSAGE, FIELD_REQUIRED_MESSAGE, MAX_CABIN_IMAGE_BYTES,
    PRICE_MIN_MESSAGE,
};

use crate::common;

#[tokio::test]
async fn test_create_cabin_success() {
    let (app, state) = common::test_app();

    let (status, response) =
        common::post_json(&app, "/api/cabins", &common::cabin_body("001").to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(response["id"].as_i64().is_some(), "Response should contain cabin ID");
    assert_eq!(response["name"], "001");
    assert_eq!(response["max_capacity"], 2);
    assert_eq!(response["regular_price"], 250.0);
    assert_eq!(response["discount"], 25.0);
    assert!(response["image"]
        .as_str()
        .unwrap()
        .starts_with("/api/cabin-images/"));

    let images = state.images.as_memory().unwrap();
    assert_eq!(images.len(), 1, "photo should be stored alongside the cabin");
}

#[tokio::test]
async fn test_create_cabin_trims_text_fields() {
    let (app, _state) = common::test_app();

    let mut body = common::cabin_body("ignored");
    body["name"] = "  002  ".into();
    body["description"] = "  Lakeside  ".into();

    let (status, response) = common::post_json(&app, "/api/cabins", &body.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["name"], "002");
    assert_eq!(response["description"], "Lakeside");
}

#[tokio::test]
async fn test_create_cabin_discount_defaults_to_zero() {
    let (app, _state) = common::test_app();

    let mut body = common::cabin_body("003");
    body.as_object_mut().unwrap().remove("discount");

    let (status, response) = common::post_json(&app, "/api/cabins", &body.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["discount"], 0.0);
}

#[tokio::test]
async fn test_create_cabin_reports_every_invalid_field() {
    let (app, state) = common::test_app();

    let body = serde_json::json!({
        "name": "   ",
        "max_capacity": 0,
        "regular_price": 0.0,
        "discount": 0.0,
        "description": "",
        "image": { "file_name": "", "content_type": "image/jpeg", "data": "" }
    });

    let (status, response) = common::post_json(&app, "/api/cabins", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["kind"], "ValidationError");
    let fields = &response["field_errors"];
    assert_eq!(fields["name"], FIELD_REQUIRED_MESSAGE);
    assert_eq!(fields["max_capacity"], CAPACITY_MIN_MESSAGE);
    assert_eq!(fields["regular_price"], PRICE_MIN_MESSAGE);
    assert_eq!(fields["description"], FIELD_REQUIRED_MESSAGE);
    assert_eq!(fields["image"], FIELD_REQUIRED_MESSAGE);

    assert!(state.images.as_memory().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_cabin_discount_above_price() {
    let (app, _state) = common::test_app();

    let mut body = common::cabin_body("004");
    body["discount"] = 300.0.into();

    let (status, response) = common::post_json(&app, "/api/cabins", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["field_errors"]["discount"], DISCOUNT_MESSAGE);

    let (_, list) = common::get(&app, "/api/cabins").await;
    assert_eq!(list.as_array().unwrap().len(), 0, "nothing should be persisted");
}

#[tokio::test]
async fn test_create_cabin_discount_equal_to_price() {
    let (app, _state) = common::test_app();

    let mut body = common::cabin_body("005");
    body["discount"] = 250.0.into();

    let (status, _) = common::post_json(&app, "/api/cabins", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_cabin_unsupported_image_type() {
    let (app, _state) = common::test_app();

    let mut body = common::cabin_body("006");
    body["image"]["content_type"] = "application/pdf".into();

    let (status, response) = common::post_json(&app, "/api/cabins", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Unsupported image type: application/pdf");
}

#[tokio::test]
async fn test_create_cabin_malformed_base64() {
    let (app, _state) = common::test_app();

    let mut body = common::cabin_body("007");
    body["image"]["data"] = "not base64!!".into();

    let (status, response) = common::post_json(&app, "/api/cabins", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Cabin image is not valid base64");
}

#[tokio::test]
async fn test_create_cabin_image_too_large() {
    let (app, state) = common::test_app();

    let mut body = common::cabin_body("008");
    let oversized = vec![0u8; MAX_CABIN_IMAGE_BYTES + 1];
    body["image"]["data"] = base64::engine::general_purpose::STANDARD
        .encode(oversized)
        .into();

    let (status, response) = common::post_json(&app, "/api/cabins", &body.to_string()).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response["kind"], "PayloadTooLarge");
    assert!(state.images.as_memory().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_cabin_missing_required_field() {
    let (app, _state) = common::test_app();

    let mut body = common::cabin_body("009");
    body.as_object_mut().unwrap().remove("image");

    let (status, _) = common::post_json(&app, "/api/cabins", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "axum rejects bodies missing fields");
}

#[tokio::test]
async fn test_create_cabin_capacity_out_of_range() {
    let (app, _state) = common::test_app();

    // Capacity is an i32 column; larger values are rejected before the handler runs.
    let body = common::cabin_body("011")
        .to_string()
        .replace("\"max_capacity\":2", "\"max_capacity\":99999999999");
    assert!(body.contains("99999999999"));

    let (status, _) = common::post_json(&app, "/api/cabins", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, list) = common::get(&app, "/api/cabins").await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}
