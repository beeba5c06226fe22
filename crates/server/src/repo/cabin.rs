use std::sync::{Arc, Mutex};

use chrono::Utc;
use shared_types::{AppError, Cabin};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// Column values for a cabin row about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCabin {
    pub name: String,
    pub max_capacity: i32,
    pub regular_price: f64,
    pub discount: f64,
    pub description: String,
    pub image: String,
}

/// Rows of the in-memory backend.
#[derive(Default)]
pub struct MemoryCabins {
    next_id: i64,
    rows: Vec<Cabin>,
}

/// Cabin persistence: Postgres in production, a local table otherwise.
#[derive(Clone)]
pub enum CabinRepo {
    Postgres(Pool<Postgres>),
    Memory(Arc<Mutex<MemoryCabins>>),
}

const CABIN_COLUMNS: &str =
    "id, name, max_capacity, regular_price, discount, description, image, created_at";

fn poisoned() -> AppError {
    AppError::internal("cabin store lock poisoned")
}

impl CabinRepo {
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        CabinRepo::Postgres(pool)
    }

    pub fn in_memory() -> Self {
        CabinRepo::Memory(Arc::new(Mutex::new(MemoryCabins::default())))
    }

    /// All cabins, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Cabin>, AppError> {
        match self {
            CabinRepo::Postgres(pool) => {
                sqlx::query_as::<_, Cabin>(&format!(
                    "SELECT {CABIN_COLUMNS} FROM cabins ORDER BY id"
                ))
                .fetch_all(pool)
                .await
                .map_err(SqlxErrorExt::into_app_error)
            }
            CabinRepo::Memory(table) => {
                let table = table.lock().map_err(|_| poisoned())?;
                Ok(table.rows.clone())
            }
        }
    }

    /// Find a cabin by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Cabin>, AppError> {
        match self {
            CabinRepo::Postgres(pool) => {
                sqlx::query_as::<_, Cabin>(&format!(
                    "SELECT {CABIN_COLUMNS} FROM cabins WHERE id = $1"
                ))
                .bind(id)
                .fetch_optional(pool)
                .await
                .map_err(SqlxErrorExt::into_app_error)
            }
            CabinRepo::Memory(table) => {
                let table = table.lock().map_err(|_| poisoned())?;
                Ok(table.rows.iter().find(|c| c.id == id).cloned())
            }
        }
    }

    /// Insert a cabin and return the stored row.
    #[tracing::instrument(skip(self, new), fields(name = %new.name))]
    pub async fn insert(&self, new: NewCabin) -> Result<Cabin, AppError> {
        match self {
            CabinRepo::Postgres(pool) => {
                sqlx::query_as::<_, Cabin>(&format!(
                    r#"
                    INSERT INTO cabins
                        (name, max_capacity, regular_price, discount, description, image)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING {CABIN_COLUMNS}
                    "#
                ))
                .bind(&new.name)
                .bind(new.max_capacity)
                .bind(new.regular_price)
                .bind(new.discount)
                .bind(&new.description)
                .bind(&new.image)
                .fetch_one(pool)
                .await
                .map_err(SqlxErrorExt::into_app_error)
            }
            CabinRepo::Memory(table) => {
                let mut table = table.lock().map_err(|_| poisoned())?;
                table.next_id += 1;
                let cabin = Cabin {
                    id: table.next_id,
                    name: new.name,
                    max_capacity: new.max_capacity,
                    regular_price: new.regular_price,
                    discount: new.discount,
                    description: new.description,
                    image: new.image,
                    created_at: Utc::now(),
                };
                table.rows.push(cabin.clone());
                Ok(cabin)
            }
        }
    }

    /// Delete a cabin. Returns whether a row was removed.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        match self {
            CabinRepo::Postgres(pool) => {
                let result = sqlx::query("DELETE FROM cabins WHERE id = $1")
                    .bind(id)
                    .execute(pool)
                    .await
                    .map_err(SqlxErrorExt::into_app_error)?;
                Ok(result.rows_affected() > 0)
            }
            CabinRepo::Memory(table) => {
                let mut table = table.lock().map_err(|_| poisoned())?;
                let before = table.rows.len();
                table.rows.retain(|c| c.id != id);
                Ok(table.rows.len() < before)
            }
        }
    }

    /// Connectivity check for the health endpoint.
    pub async fn ping(&self) -> Result<(), String> {
        match self {
            CabinRepo::Postgres(pool) => sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(pool)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string()),
            CabinRepo::Memory(_) => Ok(()),
        }
    }

    /// Short backend name for diagnostics.
    pub fn backend(&self) -> &'static str {
        match self {
            CabinRepo::Postgres(_) => "postgres",
            CabinRepo::Memory(_) => "memory",
        }
    }
}
