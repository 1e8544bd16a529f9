//! Storage abstraction trait
//!
//! Defines the `ObjectStore` trait both backends implement. The image
//! lifecycle works against this trait only and never sees a backend's wire
//! format.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// **Key format:** keys come from the `keys` module (`covers/{film_id}/…`
/// for posters, `main/…` for banners) and must not contain `..` or a
/// leading `/`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload bytes to a specific storage key. Returns the public URL.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String>;

    /// Delete an object by key.
    ///
    /// Idempotent: deleting an object that does not exist is success.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Public URL for a key (no network call).
    fn public_url(&self, key: &str) -> String;

    /// Public base-URL prefix of this store.
    ///
    /// Recomputed on every call from the backend's configured endpoint, not
    /// cached, so configuration changes take effect immediately.
    fn public_base(&self) -> String;

    /// Ownership check: the storage key behind `url` if this store hosts it.
    ///
    /// A URL belongs to this store iff it starts with `public_base()`.
    /// Externally-hosted URLs (e.g. metadata-API posters) return `None` and
    /// must never be deleted.
    fn owned_key(&self, url: &str) -> Option<String> {
        let base = self.public_base();
        url.strip_prefix(base.as_str())
            .filter(|key| !key.is_empty())
            .map(|key| key.to_string())
    }
}
