pub mod cabin;

use axum::{routing::{delete, get}, Router};
use crate::db::AppState;

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/cabins", get(cabin::list_cabins).post(cabin::create_cabin))
        .route("/api/cabins/{id}", delete(cabin::delete_cabin))
        .route("/api/cabin-images/{key}", get(cabin::get_cabin_image))
}
