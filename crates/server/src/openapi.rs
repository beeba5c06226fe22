use axum::{extract::DefaultBodyLimit, Router};
use shared_types::{AppError, AppErrorKind, Cabin, CabinImageUpload, CreateCabinRequest};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

/// OpenAPI document for the REST surface, served at `/docs`.
#[derive(OpenApi)]
#[openapi(
    info(title = "Oasis cabins API", description = "Cabin management for the hotel admin dashboard"),
    paths(
        rest::cabin::list_cabins,
        rest::cabin::create_cabin,
        rest::cabin::delete_cabin,
        rest::cabin::get_cabin_image,
        health::health_check,
    ),
    components(schemas(
        Cabin, CabinImageUpload, CreateCabinRequest, AppError, AppErrorKind,
        health::HealthResponse,
    )),
    tags(
        (name = "cabins", description = "Cabin management endpoints"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Build the full REST router: cabin routes, health, and API docs.
///
/// Create requests carry the photo inline, so the body limit is raised from
/// axum's 2 MB default to `MAX_UPLOAD_BYTES`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .layer(DefaultBodyLimit::max(crate::config::max_upload_bytes()))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_cabin_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/cabins"));
        assert!(doc.paths.paths.contains_key("/api/cabins/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
