//! Store traits the panel services depend on.
//!
//! The services never touch the remote gateway directly: they work against
//! these traits, and the binary wires in the repository-backed
//! implementations. Tests wire in in-memory fakes instead.

use async_trait::async_trait;
use filmoteca_core::models::{Banner, BannerPayload, Film, FilmPayload, SortKey};
use filmoteca_core::AppResult;
use filmoteca_db::{BannerRepository, Filter, FilmRepository};

/// Read/write access to catalog records.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// One paginated read: AND-combined predicates, multi-key sort, and an
    /// inclusive 0-indexed row range. Returns the page plus the exact total
    /// before pagination.
    async fn query(
        &self,
        filters: Vec<Filter>,
        orders: Vec<SortKey>,
        range: (u64, u64),
    ) -> AppResult<(Vec<Film>, u64)>;

    async fn get(&self, id: &str) -> AppResult<Option<Film>>;

    async fn insert(&self, payload: &FilmPayload) -> AppResult<Film>;

    async fn update(&self, id: &str, payload: &FilmPayload) -> AppResult<Film>;

    /// Patch only the poster URL; `None` clears it with an explicit null.
    async fn set_poster_url(&self, id: &str, poster_url: Option<&str>) -> AppResult<Film>;

    async fn set_premiere(&self, id: &str, is_premiere: bool) -> AppResult<Film>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    async fn duplicate(&self, id: &str) -> AppResult<Film>;
}

#[async_trait]
impl CatalogStore for FilmRepository {
    async fn query(
        &self,
        filters: Vec<Filter>,
        orders: Vec<SortKey>,
        range: (u64, u64),
    ) -> AppResult<(Vec<Film>, u64)> {
        FilmRepository::query(self, filters, orders, range).await
    }

    async fn get(&self, id: &str) -> AppResult<Option<Film>> {
        FilmRepository::get(self, id).await
    }

    async fn insert(&self, payload: &FilmPayload) -> AppResult<Film> {
        FilmRepository::insert(self, payload).await
    }

    async fn update(&self, id: &str, payload: &FilmPayload) -> AppResult<Film> {
        FilmRepository::update(self, id, payload).await
    }

    async fn set_poster_url(&self, id: &str, poster_url: Option<&str>) -> AppResult<Film> {
        FilmRepository::set_poster_url(self, id, poster_url).await
    }

    async fn set_premiere(&self, id: &str, is_premiere: bool) -> AppResult<Film> {
        FilmRepository::set_premiere(self, id, is_premiere).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        FilmRepository::delete(self, id).await
    }

    async fn duplicate(&self, id: &str) -> AppResult<Film> {
        FilmRepository::duplicate(self, id).await
    }
}

/// Access to the fixed homepage banner set.
#[async_trait]
pub trait BannerStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Banner>>;

    async fn update_image(&self, id: &str, payload: &BannerPayload) -> AppResult<Banner>;
}

#[async_trait]
impl BannerStore for BannerRepository {
    async fn list(&self) -> AppResult<Vec<Banner>> {
        BannerRepository::list(self).await
    }

    async fn update_image(&self, id: &str, payload: &BannerPayload) -> AppResult<Banner> {
        BannerRepository::update_image(self, id, payload).await
    }
}
