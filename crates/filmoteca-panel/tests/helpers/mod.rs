use std::sync::Arc;

use filmoteca_db::{FilmRepository, SupabaseClient};
use filmoteca_panel::{BulkDeleter, PosterLifecycle, QueryEngine, SaveWorkflow};
use filmoteca_storage::{ObjectStore, SupabaseStorage};

/// Test harness: one mock server standing in for both the table store and
/// the object store, plus the real gateway and storage clients wired at it.
pub struct TestApp {
    pub server: mockito::ServerGuard,
    films: FilmRepository,
    storage: Arc<SupabaseStorage>,
}

pub async fn setup_test_app() -> TestApp {
    let server = mockito::Server::new_async().await;
    let client = SupabaseClient::new(server.url(), "anon".to_string())
        .expect("client construction cannot fail with a static config");
    let storage = Arc::new(
        SupabaseStorage::new(server.url(), "anon".to_string(), "media".to_string())
            .expect("storage construction cannot fail with a static config"),
    );
    TestApp {
        server,
        films: FilmRepository::new(client),
        storage,
    }
}

impl TestApp {
    fn films(&self) -> Arc<FilmRepository> {
        Arc::new(self.films.clone())
    }

    pub fn save_workflow(&self) -> SaveWorkflow {
        SaveWorkflow::new(self.films(), PosterLifecycle::new(self.storage.clone()))
    }

    pub fn query_engine(&self) -> QueryEngine {
        QueryEngine::new(self.films())
    }

    pub fn bulk_deleter(&self) -> BulkDeleter {
        BulkDeleter::new(self.films(), PosterLifecycle::new(self.storage.clone()))
    }

    /// Public URL the primary store would hand out for a key.
    pub fn poster_url(&self, key: &str) -> String {
        self.storage.public_url(key)
    }
}
