//! Poster image lifecycle.
//!
//! Applies one poster change per save: at most one upload and at most one
//! delete. Deletion is ownership-checked: only objects whose URL starts with
//! the store's public base are ours to remove, so externally-hosted posters
//! (metadata-API art, placeholders) are never touched. Cleanup of a
//! superseded object is best-effort; an orphaned object is preferable to a
//! record pointing at a deleted one.

use std::sync::Arc;

use filmoteca_core::{AppError, AppResult};
use filmoteca_storage::keys::poster_key;
use filmoteca_storage::ObjectStore;

/// The poster decision carried by a draft into submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterChange {
    /// Leave the stored URL as it is.
    Keep,
    /// Upload these bytes and point the record at the resulting URL.
    Upload {
        data: Vec<u8>,
        content_type: String,
    },
    /// Point the record at an externally-hosted URL (no upload).
    External { url: String },
    /// Clear the poster.
    Clear,
}

/// Result of applying one poster change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterOutcome {
    /// URL the record should now carry.
    pub poster_url: Option<String>,
    /// Best-effort cleanup failures; the save itself still succeeded.
    pub warnings: Vec<String>,
}

pub struct PosterLifecycle {
    primary: Arc<dyn ObjectStore>,
}

impl PosterLifecycle {
    pub fn new(primary: Arc<dyn ObjectStore>) -> Self {
        Self { primary }
    }

    /// Apply `change` for a record that already has an id. An upload failure
    /// is fatal; removing the superseded object is not.
    pub async fn apply(
        &self,
        film_id: &str,
        change: &PosterChange,
        current_url: Option<&str>,
    ) -> AppResult<PosterOutcome> {
        let mut warnings = Vec::new();

        let poster_url = match change {
            PosterChange::Keep => current_url.map(|u| u.to_string()),
            PosterChange::Upload { data, content_type } => {
                let key = poster_key(film_id, content_type);
                let url = self
                    .primary
                    .put(&key, data.clone(), content_type)
                    .await
                    .map_err(|e| AppError::Storage(e.to_string()))?;
                Some(url)
            }
            PosterChange::External { url } => Some(url.clone()),
            PosterChange::Clear => None,
        };

        // The old object is superseded unless kept or re-pointed at itself.
        let superseded = match change {
            PosterChange::Keep => None,
            _ => current_url.filter(|old| Some(*old) != poster_url.as_deref()),
        };
        if let Some(old_url) = superseded {
            if let Some(warning) = self.discard(old_url).await {
                warnings.push(warning);
            }
        }

        Ok(PosterOutcome {
            poster_url,
            warnings,
        })
    }

    /// Best-effort delete of the object behind `url`, if this store owns it.
    /// Returns a warning message on failure; external URLs are a no-op.
    pub async fn discard(&self, url: &str) -> Option<String> {
        let key = self.primary.owned_key(url)?;
        match self.primary.delete(&key).await {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "poster cleanup failed");
                Some(format!("could not remove old poster {}: {}", key, err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use filmoteca_storage::{StorageError, StorageResult};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStore {
        puts: Mutex<Vec<String>>,
        deletes: Mutex<Vec<String>>,
        fail_delete: bool,
    }

    #[async_trait]
    impl ObjectStore for FakeStore {
        async fn put(
            &self,
            key: &str,
            _data: Vec<u8>,
            _content_type: &str,
        ) -> StorageResult<String> {
            self.puts.lock().unwrap().push(key.to_string());
            Ok(self.public_url(key))
        }

        async fn delete(&self, key: &str) -> StorageResult<()> {
            if self.fail_delete {
                return Err(StorageError::DeleteFailed("boom".to_string()));
            }
            self.deletes.lock().unwrap().push(key.to_string());
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("{}{}", self.public_base(), key)
        }

        fn public_base(&self) -> String {
            "https://store.test/public/media/".to_string()
        }
    }

    fn lifecycle(store: &Arc<FakeStore>) -> PosterLifecycle {
        PosterLifecycle::new(store.clone() as Arc<dyn ObjectStore>)
    }

    #[tokio::test]
    async fn upload_replaces_and_deletes_exactly_one_owned_object() {
        let store = Arc::new(FakeStore::default());
        let old = "https://store.test/public/media/covers/7/1.jpg";
        let outcome = lifecycle(&store)
            .apply(
                "7",
                &PosterChange::Upload {
                    data: vec![1, 2, 3],
                    content_type: "image/png".to_string(),
                },
                Some(old),
            )
            .await
            .unwrap();

        assert_eq!(store.puts.lock().unwrap().len(), 1);
        assert_eq!(
            store.deletes.lock().unwrap().as_slice(),
            ["covers/7/1.jpg".to_string()]
        );
        assert!(outcome.poster_url.unwrap().contains("covers/7/"));
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn external_old_url_is_never_deleted() {
        let store = Arc::new(FakeStore::default());
        let outcome = lifecycle(&store)
            .apply(
                "7",
                &PosterChange::Clear,
                Some("https://image.tmdb.org/t/p/w500/abc.jpg"),
            )
            .await
            .unwrap();

        assert!(store.deletes.lock().unwrap().is_empty());
        assert_eq!(outcome.poster_url, None);
    }

    #[tokio::test]
    async fn keep_touches_nothing() {
        let store = Arc::new(FakeStore::default());
        let current = "https://store.test/public/media/covers/7/1.jpg";
        let outcome = lifecycle(&store)
            .apply("7", &PosterChange::Keep, Some(current))
            .await
            .unwrap();

        assert!(store.puts.lock().unwrap().is_empty());
        assert!(store.deletes.lock().unwrap().is_empty());
        assert_eq!(outcome.poster_url.as_deref(), Some(current));
    }

    #[tokio::test]
    async fn repointing_at_the_same_external_url_skips_cleanup() {
        let store = Arc::new(FakeStore::default());
        let url = "https://image.tmdb.org/t/p/w500/abc.jpg";
        let outcome = lifecycle(&store)
            .apply(
                "7",
                &PosterChange::External {
                    url: url.to_string(),
                },
                Some(url),
            )
            .await
            .unwrap();

        assert!(store.deletes.lock().unwrap().is_empty());
        assert_eq!(outcome.poster_url.as_deref(), Some(url));
    }

    #[tokio::test]
    async fn cleanup_failure_is_a_warning_not_an_error() {
        let store = Arc::new(FakeStore {
            fail_delete: true,
            ..FakeStore::default()
        });
        let outcome = lifecycle(&store)
            .apply(
                "7",
                &PosterChange::Clear,
                Some("https://store.test/public/media/covers/7/1.jpg"),
            )
            .await
            .unwrap();

        assert_eq!(outcome.poster_url, None);
        assert_eq!(outcome.warnings.len(), 1);
    }
}
