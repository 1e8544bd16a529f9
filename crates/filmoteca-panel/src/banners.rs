//! Banner image replacement.
//!
//! A banner swap uploads the new image to the primary store, mirrors it to
//! the secondary endpoint when one is configured, updates the row, and only
//! then removes the old primary object. The mirror upload and the old-object
//! cleanup are best-effort; the primary upload and the row update are not.

use std::sync::Arc;

use filmoteca_core::models::{Banner, BannerPayload};
use filmoteca_core::{AppError, AppResult};
use filmoteca_storage::keys::banner_key;
use filmoteca_storage::ObjectStore;

use crate::store::BannerStore;

/// Outcome of one banner replacement.
#[derive(Debug)]
pub struct BannerReplaceReport {
    pub banner: Banner,
    /// Mirror or cleanup problems; the replacement itself succeeded.
    pub warnings: Vec<String>,
}

pub struct BannerService {
    store: Arc<dyn BannerStore>,
    primary: Arc<dyn ObjectStore>,
    mirror: Option<Arc<dyn ObjectStore>>,
}

impl BannerService {
    pub fn new(
        store: Arc<dyn BannerStore>,
        primary: Arc<dyn ObjectStore>,
        mirror: Option<Arc<dyn ObjectStore>>,
    ) -> Self {
        Self {
            store,
            primary,
            mirror,
        }
    }

    /// The full banner set, in id order.
    pub async fn list(&self) -> AppResult<Vec<Banner>> {
        self.store.list().await
    }

    /// Replace `banner`'s image with `data` under `main/{filename}`.
    pub async fn replace_image(
        &self,
        banner: &Banner,
        filename: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> AppResult<BannerReplaceReport> {
        if filename.trim().is_empty() {
            return Err(AppError::InvalidInput("filename is required".to_string()));
        }
        let mut warnings = Vec::new();
        let key = banner_key(filename);

        let image_url = self
            .primary
            .put(&key, data.clone(), content_type)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        if let Some(mirror) = &self.mirror {
            if let Err(err) = mirror.put(&key, data, content_type).await {
                tracing::warn!(key = %key, error = %err, "banner mirror upload failed");
                warnings.push(format!("mirror upload failed: {}", err));
            }
        }

        let payload = BannerPayload {
            image_url,
            storage_key: Some(key.clone()),
        };
        let updated = self.store.update_image(&banner.id, &payload).await?;

        // Old object: prefer the recorded key, fall back to the URL's. Keys
        // are filename-derived, so re-uploading the same name overwrote in
        // place and there is nothing to remove.
        let old_key = banner
            .storage_key
            .clone()
            .or_else(|| self.primary.owned_key(&banner.image_url));
        if let Some(old_key) = old_key.filter(|k| *k != key) {
            if let Err(err) = self.primary.delete(&old_key).await {
                tracing::warn!(key = %old_key, error = %err, "old banner cleanup failed");
                warnings.push(format!("could not remove old banner {}: {}", old_key, err));
            }
        }

        Ok(BannerReplaceReport {
            banner: updated,
            warnings,
        })
    }
}
