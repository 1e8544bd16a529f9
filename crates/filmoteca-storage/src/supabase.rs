//! Primary object store: the hosted backend's storage REST API.

use std::time::Duration;

use async_trait::async_trait;
use filmoteca_core::PanelConfig;
use reqwest::Client;

use crate::traits::{ObjectStore, StorageError, StorageResult};

const HTTP_TIMEOUT_SECS: u64 = 60;

/// Object store backed by the hosted backend's storage API.
///
/// Objects live under one bucket and are publicly readable via
/// `{project_url}/storage/v1/object/public/{bucket}/{key}`.
#[derive(Clone, Debug)]
pub struct SupabaseStorage {
    client: Client,
    base_url: String,
    anon_key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(base_url: String, anon_key: String, bucket: String) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            bucket,
        })
    }

    pub fn from_config(config: &PanelConfig) -> StorageResult<Self> {
        Self::new(
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
            config.storage_bucket.clone(),
        )
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }

    fn validate_key(key: &str) -> StorageResult<()> {
        if key.is_empty() || key.starts_with('/') || key.contains("..") {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String> {
        Self::validate_key(key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.object_url(key))
            .bearer_auth(&self.anon_key)
            .header("apikey", &self.anon_key)
            .header("content-type", content_type)
            .header("x-upsert", "true")
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                bucket = %self.bucket,
                key = %key,
                status = %status,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "storage upload failed"
            );
            return Err(StorageError::UploadFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "storage upload successful"
        );

        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        Self::validate_key(key)?;

        let response = self
            .client
            .delete(self.object_url(key))
            .bearer_auth(&self.anon_key)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(e.to_string()))?;

        let status = response.status();
        // Idempotent delete: the object being already gone is success.
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(bucket = %self.bucket, key = %key, "object already absent");
            return Ok(());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                bucket = %self.bucket,
                key = %key,
                status = %status,
                "storage delete failed"
            );
            return Err(StorageError::DeleteFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        tracing::info!(bucket = %self.bucket, key = %key, "storage delete successful");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}{}", self.public_base(), key)
    }

    fn public_base(&self) -> String {
        format!(
            "{}/storage/v1/object/public/{}/",
            self.base_url, self.bucket
        )
    }
}
