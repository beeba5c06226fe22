use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};

use super::ImageStore;

/// Read an env var, trying the primary name first then a fallback.
pub fn env_or(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .or_else(|| std::env::var(fallback).ok())
}

/// Bucket name for cabin photos (from env or default).
fn images_bucket() -> String {
    std::env::var("CABIN_IMAGES_BUCKET").unwrap_or_else(|_| "cabin-images".to_string())
}

/// S3-compatible photo store backed by MinIO locally or Tigris on Fly.
///
/// Supports both naming schemes:
///   - `AWS_ENDPOINT_URL_S3` / `S3_ENDPOINT`
///   - `AWS_ACCESS_KEY_ID`   / `S3_ACCESS_KEY`
///   - `AWS_SECRET_ACCESS_KEY` / `S3_SECRET_KEY`
///   - `AWS_REGION`          / `S3_REGION`
#[derive(Clone)]
pub struct S3ImageStore {
    client: Client,
    endpoint: String,
    bucket: String,
}

impl S3ImageStore {
    /// Build a store from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let endpoint = env_or("AWS_ENDPOINT_URL_S3", "S3_ENDPOINT")
            .ok_or("AWS_ENDPOINT_URL_S3 or S3_ENDPOINT must be set")?;
        let access_key = env_or("AWS_ACCESS_KEY_ID", "S3_ACCESS_KEY")
            .ok_or("AWS_ACCESS_KEY_ID or S3_ACCESS_KEY must be set")?;
        let secret_key = env_or("AWS_SECRET_ACCESS_KEY", "S3_SECRET_KEY")
            .ok_or("AWS_SECRET_ACCESS_KEY or S3_SECRET_KEY must be set")?;
        let region =
            env_or("AWS_REGION", "S3_REGION").unwrap_or_else(|| "us-east-1".to_string());

        let creds = Credentials::new(&access_key, &secret_key, None, None, "env");

        let config = aws_sdk_s3::Config::builder()
            .endpoint_url(&endpoint)
            .region(Region::new(region))
            .credentials_provider(creds)
            .force_path_style(true)
            .behavior_version_latest()
            .build();

        Ok(Self {
            client: Client::from_conf(config),
            endpoint,
            bucket: images_bucket(),
        })
    }

    /// Create the bucket if missing and make its objects publicly readable.
    ///
    /// Tigris manages public access outside of bucket policies, so the
    /// policy is only applied on other providers.
    pub async fn ensure_bucket(&self) {
        let exists = self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok();

        if !exists {
            tracing::info!("Creating cabin image bucket '{}'...", self.bucket);
            if let Err(e) = self.client.create_bucket().bucket(&self.bucket).send().await {
                tracing::warn!("Failed to create bucket '{}': {}", self.bucket, e);
                return;
            }
        }

        if self.is_tigris() {
            return;
        }

        let policy = format!(
            r#"{{"Version":"2012-10-17","Statement":[{{"Effect":"Allow","Principal":"*","Action":["s3:GetObject"],"Resource":["arn:aws:s3:::{}/*"]}}]}}"#,
            self.bucket
        );
        match self
            .client
            .put_bucket_policy()
            .bucket(&self.bucket)
            .policy(&policy)
            .send()
            .await
        {
            Ok(_) => tracing::info!("Public-read policy applied to '{}'", self.bucket),
            Err(e) => tracing::warn!("Failed to set bucket policy on '{}': {}", self.bucket, e),
        }
    }

    fn is_tigris(&self) -> bool {
        self.endpoint.contains("tigris")
    }
}

impl ImageStore for S3ImageStore {
    /// Tigris is addressed virtual-hosted style, everything else path style.
    fn public_url(&self, key: &str) -> String {
        if self.is_tigris() {
            let host = self
                .endpoint
                .trim_start_matches("https://")
                .trim_start_matches("http://");
            format!("https://{}.{}/{}", self.bucket, host, key)
        } else {
            format!("{}/{}/{}", self.endpoint.trim_end_matches('/'), self.bucket, key)
        }
    }

    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                let svc = e.into_service_error();
                tracing::error!("S3 PutObject failed for key '{}': {:?}", key, svc);
                format!("S3 upload failed: {}", svc)
            })?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| format!("DELETE failed: {}", e))?;
        Ok(())
    }
}
