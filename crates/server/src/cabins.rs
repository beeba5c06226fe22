//! Cabin use cases shared by server functions and REST handlers.

use base64::Engine;
use shared_types::{
    is_valid_cabin_image_type, AppError, Cabin, CreateCabinRequest, FIELD_REQUIRED_MESSAGE,
    IMAGE_UPLOAD_FAILED_MESSAGE, MAX_CABIN_IMAGE_BYTES,
};

use crate::error_convert::ValidateRequest;
use crate::repo::{CabinRepo, NewCabin};
use crate::storage::{image_key, key_from_url, ImageStore};

/// Run every field rule and collect all failures into one validation error.
fn validate_create(req: &CreateCabinRequest) -> Result<(), AppError> {
    let mut field_errors = match req.validate_request() {
        Ok(()) => Default::default(),
        Err(e) => e.field_errors,
    };

    if let Err(e) = req.check_discount() {
        field_errors.extend(e.field_errors);
    }

    if req.image.data.is_empty() {
        field_errors.insert("image".to_string(), FIELD_REQUIRED_MESSAGE.to_string());
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation("Validation failed", field_errors))
    }
}

/// Decode the attached photo, enforcing type and size limits.
fn decode_image(req: &CreateCabinRequest) -> Result<Vec<u8>, AppError> {
    if !is_valid_cabin_image_type(&req.image.content_type) {
        return Err(AppError::bad_request(format!(
            "Unsupported image type: {}",
            req.image.content_type
        )));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(req.image.data.as_bytes())
        .map_err(|_| AppError::bad_request("Cabin image is not valid base64"))?;

    if bytes.len() > MAX_CABIN_IMAGE_BYTES {
        return Err(AppError::payload_too_large(format!(
            "Cabin image must be at most {} MB",
            MAX_CABIN_IMAGE_BYTES / (1024 * 1024)
        )));
    }

    Ok(bytes)
}

/// Create a cabin and store its photo.
///
/// The row is inserted first so its image URL is final; if the upload then
/// fails the row is removed again and no cabin is reported as created.
#[tracing::instrument(skip(repo, images, req), fields(name = %req.name))]
pub async fn create_cabin(
    repo: &CabinRepo,
    images: &impl ImageStore,
    req: CreateCabinRequest,
) -> Result<Cabin, AppError> {
    let req = req.normalized();
    validate_create(&req)?;
    let bytes = decode_image(&req)?;

    let key = image_key(&req.image.file_name);
    let image = images.public_url(&key);

    let cabin = repo
        .insert(NewCabin {
            name: req.name,
            max_capacity: req.max_capacity,
            regular_price: req.regular_price,
            discount: req.discount,
            description: req.description,
            image,
        })
        .await?;

    if let Err(e) = images.put(&key, &req.image.content_type, bytes).await {
        tracing::error!(cabin_id = cabin.id, "Cabin image upload failed: {e}");
        if let Err(rollback) = repo.delete(cabin.id).await {
            tracing::error!(cabin_id = cabin.id, "Failed to remove cabin after upload error: {rollback}");
        }
        return Err(AppError::internal(IMAGE_UPLOAD_FAILED_MESSAGE));
    }

    tracing::info!(cabin_id = cabin.id, "Cabin created");
    Ok(cabin)
}

/// All cabins, oldest first.
pub async fn list_cabins(repo: &CabinRepo) -> Result<Vec<Cabin>, AppError> {
    repo.list().await
}

/// Delete a cabin and, best effort, its photo.
#[tracing::instrument(skip(repo, images))]
pub async fn delete_cabin(
    repo: &CabinRepo,
    images: &impl ImageStore,
    id: i64,
) -> Result<(), AppError> {
    let cabin = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Cabin not found"))?;

    if !repo.delete(id).await? {
        return Err(AppError::not_found("Cabin not found"));
    }

    if let Some(key) = key_from_url(&cabin.image) {
        if let Err(e) = images.delete(key).await {
            tracing::warn!(cabin_id = id, "Failed to delete cabin image: {e}");
        }
    }

    Ok(())
}
