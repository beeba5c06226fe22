use dioxus::prelude::*;
use shared_types::{Cabin, CreateCabinRequest, FeatureFlags};

#[cfg(feature = "server")]
use crate::db::get_state;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

/// Get the current feature flags. Flags are not sensitive.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// List every cabin, oldest first.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_cabins() -> Result<Vec<Cabin>, ServerFnError> {
    let state = get_state().await;
    crate::cabins::list_cabins(&state.cabins)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Create a cabin with its photo.
///
/// Failures carry a serialized `AppError`; validation failures include
/// per-field messages.
#[cfg_attr(feature = "server", tracing::instrument(skip(req)))]
#[server]
pub async fn create_cabin(req: CreateCabinRequest) -> Result<Cabin, ServerFnError> {
    let state = get_state().await;
    crate::cabins::create_cabin(&state.cabins, &state.images, req)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Delete a cabin and its photo.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_cabin(id: i64) -> Result<(), ServerFnError> {
    let state = get_state().await;
    crate::cabins::delete_cabin(&state.cabins, &state.images, id)
        .await
        .map_err(|e| e.into_server_fn_error())
}
