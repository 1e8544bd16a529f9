//! Sequential bulk delete.
//!
//! Records are removed one at a time, each one's owned poster object first
//! (best-effort), then the row. A failed image delete never blocks the row
//! delete; a failed row delete leaves that record untouched and the run
//! continues with the rest.

use std::sync::Arc;

use filmoteca_core::models::Film;

use crate::posters::PosterLifecycle;
use crate::store::CatalogStore;

/// Tally of one bulk delete run.
#[derive(Debug, Default)]
pub struct BulkDeleteSummary {
    pub deleted: Vec<String>,
    /// (record id, error message) for rows that could not be removed.
    pub failed: Vec<(String, String)>,
    /// Best-effort image cleanup failures.
    pub warnings: Vec<String>,
}

pub struct BulkDeleter {
    store: Arc<dyn CatalogStore>,
    posters: PosterLifecycle,
}

impl BulkDeleter {
    pub fn new(store: Arc<dyn CatalogStore>, posters: PosterLifecycle) -> Self {
        Self { store, posters }
    }

    /// Delete every film in `films`, sequentially.
    pub async fn delete_all(&self, films: &[Film]) -> BulkDeleteSummary {
        let mut summary = BulkDeleteSummary::default();

        for film in films {
            if let Some(url) = &film.poster_url {
                if let Some(warning) = self.posters.discard(url).await {
                    summary.warnings.push(warning);
                }
            }
            match self.store.delete(&film.id).await {
                Ok(()) => summary.deleted.push(film.id.clone()),
                Err(err) => {
                    tracing::warn!(film_id = %film.id, error = %err, "bulk delete failed for record");
                    summary.failed.push((film.id.clone(), err.client_message()));
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use filmoteca_core::models::{FilmPayload, SortKey};
    use filmoteca_core::{AppError, AppResult};
    use filmoteca_db::Filter;
    use filmoteca_storage::{ObjectStore, StorageError, StorageResult};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeCatalog {
        deleted: Mutex<Vec<String>>,
        fail_ids: Vec<String>,
    }

    #[async_trait]
    impl CatalogStore for FakeCatalog {
        async fn query(
            &self,
            _filters: Vec<Filter>,
            _orders: Vec<SortKey>,
            _range: (u64, u64),
        ) -> AppResult<(Vec<Film>, u64)> {
            Ok((Vec::new(), 0))
        }

        async fn get(&self, _id: &str) -> AppResult<Option<Film>> {
            Ok(None)
        }

        async fn insert(&self, _payload: &FilmPayload) -> AppResult<Film> {
            Err(AppError::Internal("not used".to_string()))
        }

        async fn update(&self, _id: &str, _payload: &FilmPayload) -> AppResult<Film> {
            Err(AppError::Internal("not used".to_string()))
        }

        async fn set_poster_url(
            &self,
            _id: &str,
            _poster_url: Option<&str>,
        ) -> AppResult<Film> {
            Err(AppError::Internal("not used".to_string()))
        }

        async fn set_premiere(&self, _id: &str, _is_premiere: bool) -> AppResult<Film> {
            Err(AppError::Internal("not used".to_string()))
        }

        async fn delete(&self, id: &str) -> AppResult<()> {
            if self.fail_ids.iter().any(|f| f == id) {
                return Err(AppError::Remote("row locked".to_string()));
            }
            self.deleted.lock().unwrap().push(id.to_string());
            Ok(())
        }

        async fn duplicate(&self, id: &str) -> AppResult<Film> {
            Err(AppError::NotFound(id.to_string()))
        }
    }

    #[derive(Default)]
    struct FakeStore {
        deletes: Mutex<Vec<String>>,
        fail_keys: Vec<String>,
    }

    #[async_trait]
    impl ObjectStore for FakeStore {
        async fn put(
            &self,
            key: &str,
            _data: Vec<u8>,
            _content_type: &str,
        ) -> StorageResult<String> {
            Ok(self.public_url(key))
        }

        async fn delete(&self, key: &str) -> StorageResult<()> {
            if self.fail_keys.iter().any(|f| f == key) {
                return Err(StorageError::DeleteFailed("denied".to_string()));
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

    fn film(id: &str, poster_url: Option<&str>) -> Film {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Film {}", id),
            "poster_url": poster_url,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn deletes_every_row_and_owned_posters() {
        let catalog = Arc::new(FakeCatalog::default());
        let store = Arc::new(FakeStore::default());
        let deleter = BulkDeleter::new(
            catalog.clone(),
            PosterLifecycle::new(store.clone() as Arc<dyn ObjectStore>),
        );

        let films = vec![
            film("1", Some("https://store.test/public/media/covers/1/a.jpg")),
            film("2", Some("https://image.tmdb.org/t/p/w500/x.jpg")),
            film("3", None),
        ];
        let summary = deleter.delete_all(&films).await;

        assert_eq!(summary.deleted, vec!["1", "2", "3"]);
        assert!(summary.failed.is_empty());
        assert!(summary.warnings.is_empty());
        // Only the owned object was removed; the external URL never was.
        assert_eq!(
            store.deletes.lock().unwrap().as_slice(),
            ["covers/1/a.jpg".to_string()]
        );
    }

    #[tokio::test]
    async fn image_failure_is_a_warning_and_the_row_still_goes() {
        let catalog = Arc::new(FakeCatalog::default());
        let store = Arc::new(FakeStore {
            fail_keys: vec!["covers/1/a.jpg".to_string()],
            ..FakeStore::default()
        });
        let deleter = BulkDeleter::new(
            catalog.clone(),
            PosterLifecycle::new(store as Arc<dyn ObjectStore>),
        );

        let films = vec![
            film("1", Some("https://store.test/public/media/covers/1/a.jpg")),
            film("2", None),
            film("3", None),
        ];
        let summary = deleter.delete_all(&films).await;

        assert_eq!(summary.deleted, vec!["1", "2", "3"]);
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.failed.is_empty());
    }

    #[tokio::test]
    async fn row_failure_skips_only_that_record() {
        let catalog = Arc::new(FakeCatalog {
            fail_ids: vec!["2".to_string()],
            ..FakeCatalog::default()
        });
        let deleter = BulkDeleter::new(
            catalog.clone(),
            PosterLifecycle::new(Arc::new(FakeStore::default()) as Arc<dyn ObjectStore>),
        );

        let films = vec![film("1", None), film("2", None), film("3", None)];
        let summary = deleter.delete_all(&films).await;

        assert_eq!(summary.deleted, vec!["1", "3"]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "2");
    }
}
