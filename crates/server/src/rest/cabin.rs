use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use shared_types::{AppError, Cabin, CreateCabinRequest};

use crate::repo::CabinRepo;
use crate::storage::CabinImages;

// ── Cabin CRUD ──────────────────────────────────────────────────────

/// GET /api/cabins
#[utoipa::path(
    get,
    path = "/api/cabins",
    responses((status = 200, description = "All cabins", body = Vec<Cabin>)),
    tag = "cabins"
)]
pub async fn list_cabins(State(repo): State<CabinRepo>) -> Result<Json<Vec<Cabin>>, AppError> {
    let cabins = crate::cabins::list_cabins(&repo).await?;
    Ok(Json(cabins))
}

/// POST /api/cabins
#[utoipa::path(
    post,
    path = "/api/cabins",
    request_body = CreateCabinRequest,
    responses(
        (status = 201, description = "Cabin created", body = Cabin),
        (status = 400, description = "Unsupported or malformed image", body = AppError),
        (status = 413, description = "Image too large", body = AppError),
        (status = 422, description = "Validation failed", body = AppError),
        (status = 500, description = "Image upload failed", body = AppError)
    ),
    tag = "cabins"
)]
pub async fn create_cabin(
    State(repo): State<CabinRepo>,
    State(images): State<CabinImages>,
    Json(body): Json<CreateCabinRequest>,
) -> Result<(StatusCode, Json<Cabin>), AppError> {
    let cabin = crate::cabins::create_cabin(&repo, &images, body).await?;
    Ok((StatusCode::CREATED, Json(cabin)))
}

/// DELETE /api/cabins/{id}
#[utoipa::path(
    delete,
    path = "/api/cabins/{id}",
    params(("id" = i64, Path, description = "Cabin ID")),
    responses(
        (status = 204, description = "Cabin deleted"),
        (status = 404, description = "Cabin not found", body = AppError)
    ),
    tag = "cabins"
)]
pub async fn delete_cabin(
    State(repo): State<CabinRepo>,
    State(images): State<CabinImages>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    crate::cabins::delete_cabin(&repo, &images, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Photos ──────────────────────────────────────────────────────────

/// GET /api/cabin-images/{key}
///
/// Serves photos held by the in-memory store. With S3 enabled photos are
/// fetched from the bucket directly and this route always 404s.
#[utoipa::path(
    get,
    path = "/api/cabin-images/{key}",
    params(("key" = String, Path, description = "Object key")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Image not found", body = AppError)
    ),
    tag = "cabins"
)]
pub async fn get_cabin_image(
    State(images): State<CabinImages>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let image = images
        .as_memory()
        .and_then(|store| store.get(&key))
        .ok_or_else(|| AppError::not_found("Image not found"))?;

    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes).into_response())
}
