use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::ImageStore;

/// A stored object: content type plus bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Process-local image store used when S3 is disabled and in tests.
#[derive(Clone, Default)]
pub struct MemoryImageStore {
    objects: Arc<RwLock<HashMap<String, StoredImage>>>,
}

impl MemoryImageStore {
    /// Fetch a stored object by key.
    pub fn get(&self, key: &str) -> Option<StoredImage> {
        self.objects
            .read()
            .ok()
            .and_then(|objects| objects.get(key).cloned())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ImageStore for MemoryImageStore {
    fn public_url(&self, key: &str) -> String {
        format!("/api/cabin-images/{key}")
    }

    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String> {
        let mut objects = self
            .objects
            .write()
            .map_err(|_| "image store lock poisoned".to_string())?;
        objects.insert(
            key.to_string(),
            StoredImage {
                content_type: content_type.to_string(),
                bytes: body,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        let mut objects = self
            .objects
            .write()
            .map_err(|_| "image store lock poisoned".to_string())?;
        objects.remove(key);
        Ok(())
    }
}
