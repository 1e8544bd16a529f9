//! Typed repository for the `films` table.

use filmoteca_core::constants::FILMS_TABLE;
use filmoteca_core::models::{Film, FilmPayload, SortKey};
use filmoteca_core::{AppError, AppResult};

use crate::client::SupabaseClient;
use crate::query::Filter;

/// Repository over catalog records. Holds the injected gateway client.
#[derive(Clone, Debug)]
pub struct FilmRepository {
    client: SupabaseClient,
}

impl FilmRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Run one catalog read: AND-combined predicates, multi-key sort, and an
    /// inclusive row range. Returns the page plus the exact total before
    /// pagination.
    #[tracing::instrument(skip(self, filters, orders), fields(db.table = FILMS_TABLE, db.operation = "select"))]
    pub async fn query(
        &self,
        filters: Vec<Filter>,
        orders: Vec<SortKey>,
        range: (u64, u64),
    ) -> AppResult<(Vec<Film>, u64)> {
        let (rows, total) = self
            .client
            .from(FILMS_TABLE)
            .filters(filters)
            .orders(orders)
            .range(range.0, range.1)
            .count_exact()
            .fetch()
            .await?;
        let total =
            total.ok_or_else(|| AppError::Remote("missing total count".to_string()))?;
        Ok((rows, total))
    }

    #[tracing::instrument(skip(self), fields(db.table = FILMS_TABLE, db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: &str) -> AppResult<Option<Film>> {
        let (mut rows, _) = self
            .client
            .from(FILMS_TABLE)
            .filter(Filter::eq("id", id))
            .fetch::<Film>()
            .await?;
        Ok(rows.pop())
    }

    #[tracing::instrument(skip(self, payload), fields(db.table = FILMS_TABLE, db.operation = "insert"))]
    pub async fn insert(&self, payload: &FilmPayload) -> AppResult<Film> {
        self.client.insert(FILMS_TABLE, payload).await
    }

    #[tracing::instrument(skip(self, payload), fields(db.table = FILMS_TABLE, db.operation = "update", db.record_id = %id))]
    pub async fn update(&self, id: &str, payload: &FilmPayload) -> AppResult<Film> {
        self.client.update(FILMS_TABLE, id, payload).await
    }

    /// Patch only the poster URL. Sends an explicit null to clear it.
    #[tracing::instrument(skip(self), fields(db.table = FILMS_TABLE, db.operation = "update", db.record_id = %id))]
    pub async fn set_poster_url(&self, id: &str, poster_url: Option<&str>) -> AppResult<Film> {
        self.client
            .update(
                FILMS_TABLE,
                id,
                &serde_json::json!({ "poster_url": poster_url }),
            )
            .await
    }

    /// Toggle the premiere flag.
    #[tracing::instrument(skip(self), fields(db.table = FILMS_TABLE, db.operation = "update", db.record_id = %id))]
    pub async fn set_premiere(&self, id: &str, is_premiere: bool) -> AppResult<Film> {
        self.client
            .update(
                FILMS_TABLE,
                id,
                &serde_json::json!({ "is_premiere": is_premiere }),
            )
            .await
    }

    #[tracing::instrument(skip(self), fields(db.table = FILMS_TABLE, db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client.delete(FILMS_TABLE, id).await
    }

    /// Duplicate a record: fetch it, strip the server-assigned fields, mark
    /// the title as a copy, and insert the rest unchanged.
    #[tracing::instrument(skip(self), fields(db.table = FILMS_TABLE, db.operation = "insert", db.record_id = %id))]
    pub async fn duplicate(&self, id: &str) -> AppResult<Film> {
        let film = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("film {} not found", id)))?;
        let payload = duplicate_payload(&film);
        self.client.insert(FILMS_TABLE, &payload).await
    }
}

fn duplicate_payload(film: &Film) -> FilmPayload {
    FilmPayload {
        title: format!("{} (Copia)", film.title),
        year_film: film.year_film.clone(),
        film_type: film.film_type.clone(),
        cult_film: film.cult_film,
        cult_brand: film.cult_brand.clone(),
        genres_list: film.genres_list.clone(),
        genres_string: film.genres_string.clone(),
        q_disks: film.q_disks,
        special_edittion: film.special_edittion,
        is_premiere: film.is_premiere,
        poster_url: film.poster_url.clone(),
        original_language: film.original_language.clone(),
        audio: film.audio.clone(),
        subs: film.subs.clone(),
    }
}
