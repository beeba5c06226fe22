//! Object storage for cabin photos.
//!
//! Two backends exist: S3-compatible storage (MinIO locally, Tigris on Fly)
//! when the `s3` feature flag is on, and a process-local map otherwise. The
//! local store serves its objects back through `GET /api/cabin-images/{key}`.

mod memory;
mod s3;

pub use memory::MemoryImageStore;
pub use s3::S3ImageStore;

/// Object storage operations for cabin photos.
#[allow(async_fn_in_trait)]
pub trait ImageStore: Send + Sync {
    /// Public URL an object will be reachable at once uploaded.
    fn public_url(&self, key: &str) -> String;

    /// Upload bytes under `key`.
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String>;

    /// Delete an object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), String>;
}

/// The image backend selected at startup.
#[derive(Clone)]
pub enum CabinImages {
    S3(S3ImageStore),
    Memory(MemoryImageStore),
}

impl CabinImages {
    pub fn in_memory() -> Self {
        CabinImages::Memory(MemoryImageStore::default())
    }

    /// The local store, when that is the active backend.
    pub fn as_memory(&self) -> Option<&MemoryImageStore> {
        match self {
            CabinImages::Memory(store) => Some(store),
            CabinImages::S3(_) => None,
        }
    }
}

impl ImageStore for CabinImages {
    fn public_url(&self, key: &str) -> String {
        match self {
            CabinImages::S3(store) => store.public_url(key),
            CabinImages::Memory(store) => store.public_url(key),
        }
    }

    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String> {
        match self {
            CabinImages::S3(store) => store.put(key, content_type, body).await,
            CabinImages::Memory(store) => store.put(key, content_type, body).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        match self {
            CabinImages::S3(store) => store.delete(key).await,
            CabinImages::Memory(store) => store.delete(key).await,
        }
    }
}

/// Build a unique object key for an uploaded file name.
///
/// Anything outside `[A-Za-z0-9._-]` becomes `-`, so the key is a single
/// URL segment that needs no percent-encoding.
pub fn image_key(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = if cleaned.trim_matches(|c| c == '-' || c == '.').is_empty() {
        "image".to_string()
    } else {
        cleaned
    };
    format!("{}-{}", uuid::Uuid::new_v4(), cleaned)
}

/// Recover the object key from a URL produced by `ImageStore::public_url`.
pub fn key_from_url(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|k| !k.is_empty())
}
