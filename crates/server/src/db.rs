use axum::extract::FromRef;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::repo::CabinRepo;
use crate::storage::{CabinImages, S3ImageStore};

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<CabinRepo>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub cabins: CabinRepo,
    pub images: CabinImages,
}

impl AppState {
    /// State backed entirely by process memory (tests, local demos).
    pub fn in_memory() -> Self {
        Self {
            cabins: CabinRepo::in_memory(),
            images: CabinImages::in_memory(),
        }
    }

    /// Build state from the environment and feature flags.
    ///
    /// Without `DATABASE_URL` cabins live in memory; with the `s3` flag off
    /// (or S3 misconfigured) photos do too.
    pub fn from_env() -> Self {
        let cabins = match create_pool() {
            Some(pool) => CabinRepo::postgres(pool),
            None => {
                tracing::warn!("DATABASE_URL not set; cabins are stored in memory");
                CabinRepo::in_memory()
            }
        };

        let images = if crate::config::feature_flags().s3 {
            match S3ImageStore::from_env() {
                Ok(store) => CabinImages::S3(store),
                Err(e) => {
                    tracing::error!("S3 enabled but not configured ({e}); storing photos in memory");
                    CabinImages::in_memory()
                }
            }
        } else {
            CabinImages::in_memory()
        };

        tracing::info!(cabins = cabins.backend(), "Cabin store selected");
        Self { cabins, images }
    }
}

/// State created lazily; no connections are opened until the first query.
static STATE: OnceLock<AppState> = OnceLock::new();
static MIGRATED: AtomicBool = AtomicBool::new(false);

/// Create a connection pool from `DATABASE_URL`, if one is configured.
/// Uses `connect_lazy` so no connections open until the first query.
pub fn create_pool() -> Option<Pool<Postgres>> {
    // Load .env file if present (ignored in production where env vars are set directly).
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL").ok()?;

    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    match PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(&database_url)
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            tracing::error!("Invalid DATABASE_URL: {e}");
            None
        }
    }
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Register the state built at startup. Later calls keep the first state.
pub fn install_state(state: AppState) -> &'static AppState {
    STATE.get_or_init(|| state)
}

/// Get or initialize the shared state.
/// Migrations run once on the first call; subsequent calls return immediately.
///
/// Used by Dioxus server functions (`api.rs`).
/// REST handlers receive the same state through `State<AppState>`.
pub async fn get_state() -> &'static AppState {
    let state = STATE.get_or_init(AppState::from_env);

    if let CabinRepo::Postgres(pool) = &state.cabins {
        if !MIGRATED.swap(true, Ordering::SeqCst) {
            if let Err(e) = run_migrations(pool).await {
                tracing::error!("Failed to run database migrations: {e}");
            }
        }
    }

    state
}
