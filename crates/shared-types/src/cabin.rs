use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::AppError;

#[cfg(feature = "validation")]
use validator::Validate;

// ── Cabin constants ─────────────────────────────────────────────────

/// Collection key used to invalidate cached cabin listings.
pub const CABINS_QUERY_KEY: &str = "cabins";

pub const FIELD_REQUIRED_MESSAGE: &str = "This field is required";
pub const CAPACITY_MIN_MESSAGE: &str = "Capacity needs to be at least 1";
pub const PRICE_MIN_MESSAGE: &str = "Price needs to be at least 1";
pub const DISCOUNT_MESSAGE: &str = "Discount must be less than the regular price";
pub const CABIN_CREATED_MESSAGE: &str = "Cabin created successfully";
pub const IMAGE_UPLOAD_FAILED_MESSAGE: &str =
    "Cabin image could not be uploaded and the cabin was not created";

/// Image content types accepted for cabin photos.
pub const CABIN_IMAGE_TYPES: &[&str] = &[
    "image/jpeg", "image/png", "image/webp", "image/gif", "image/avif",
];

/// Upper bound on a decoded cabin photo.
pub const MAX_CABIN_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Check whether a content type is an accepted cabin photo type.
pub fn is_valid_cabin_image_type(s: &str) -> bool {
    CABIN_IMAGE_TYPES.contains(&s)
}

// ── Cabin DB struct ─────────────────────────────────────────────────

/// A rentable cabin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Cabin {
    pub id: i64,
    pub name: String,
    pub max_capacity: i32,
    pub regular_price: f64,
    pub discount: f64,
    pub description: String,
    /// Public URL of the cabin photo.
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl Cabin {
    /// Nightly price after the discount is applied.
    pub fn discounted_price(&self) -> f64 {
        (self.regular_price - self.discount).max(0.0)
    }
}

// ── Cabin request types ─────────────────────────────────────────────

/// A single photo attached to a create request, base64-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CabinImageUpload {
    pub file_name: String,
    pub content_type: String,
    /// Standard base64 of the file bytes.
    pub data: String,
}

/// Request to create a new cabin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateCabinRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "This field is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "Capacity needs to be at least 1"))
    )]
    pub max_capacity: i32,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1.0, message = "Price needs to be at least 1"))
    )]
    pub regular_price: f64,
    #[serde(default)]
    pub discount: f64,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "This field is required"))
    )]
    pub description: String,
    pub image: CabinImageUpload,
}

impl CreateCabinRequest {
    /// Trim the free-text fields in place.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self
    }

    /// Cross-field rule: the discount may not exceed the regular price.
    pub fn check_discount(&self) -> Result<(), AppError> {
        if self.discount.is_nan() || self.discount > self.regular_price {
            let mut field_errors = HashMap::new();
            field_errors.insert("discount".to_string(), DISCOUNT_MESSAGE.to_string());
            return Err(AppError::validation("Validation failed", field_errors));
        }
        Ok(())
    }
}
