//! Secondary object store: the mirror upload endpoint.
//!
//! The mirror accepts `multipart/form-data` POSTs with a `file` part and a
//! `path` field naming the storage key, and answers `{"success":true}` or a
//! non-200 status with `{"error":"…"}`. Writes are upserts keyed by `path`.

use std::time::Duration;

use async_trait::async_trait;
use filmoteca_core::PanelConfig;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::traits::{ObjectStore, StorageError, StorageResult};

const HTTP_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct MirrorResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Best-effort mirror of the primary store.
#[derive(Clone, Debug)]
pub struct MirrorStore {
    client: Client,
    endpoint: String,
    bucket: String,
}

impl MirrorStore {
    pub fn new(endpoint: String, bucket: String) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket,
        })
    }

    /// Build from config when a mirror endpoint is configured.
    pub fn from_config(config: &PanelConfig) -> StorageResult<Option<Self>> {
        match (&config.mirror_endpoint, &config.mirror_bucket) {
            (Some(endpoint), Some(bucket)) => {
                Ok(Some(Self::new(endpoint.clone(), bucket.clone())?))
            }
            (Some(_), None) | (None, Some(_)) => Err(StorageError::ConfigError(
                "mirror endpoint and bucket must both be set".to_string(),
            )),
            (None, None) => Ok(None),
        }
    }
}

#[async_trait]
impl ObjectStore for MirrorStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String> {
        let filename = key.rsplit('/').next().unwrap_or(key).to_string();
        let part = Part::bytes(data)
            .file_name(filename)
            .mime_str(content_type)
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        let form = Form::new().part("file", part).text("path", key.to_string());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        let status = response.status();
        let body: MirrorResponse = response
            .json()
            .await
            .unwrap_or(MirrorResponse {
                success: false,
                error: Some("unparseable mirror response".to_string()),
            });

        if !status.is_success() || !body.success {
            let message = body
                .error
                .unwrap_or_else(|| format!("mirror upload failed with status {}", status));
            tracing::warn!(bucket = %self.bucket, key = %key, status = %status, "mirror upload failed");
            return Err(StorageError::UploadFailed(message));
        }

        tracing::info!(bucket = %self.bucket, key = %key, "mirror upload successful");
        Ok(self.public_url(key))
    }

    /// The mirror endpoint exposes no delete operation; superseded objects
    /// are overwritten in place on the next write to the same key.
    async fn delete(&self, key: &str) -> StorageResult<()> {
        tracing::debug!(bucket = %self.bucket, key = %key, "mirror delete skipped (unsupported)");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}{}", self.public_base(), key)
    }

    fn public_base(&self) -> String {
        format!("{}/{}/", self.endpoint, self.bucket)
    }
}
