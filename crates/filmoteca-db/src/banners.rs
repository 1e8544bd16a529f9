//! Typed repository for the fixed banner set (`bannersInicio`).

use filmoteca_core::constants::BANNERS_TABLE;
use filmoteca_core::models::{Banner, BannerPayload, SortKey};
use filmoteca_core::AppResult;

use crate::client::SupabaseClient;

#[derive(Clone, Debug)]
pub struct BannerRepository {
    client: SupabaseClient,
}

impl BannerRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// The full banner set, in id order. Cardinality is fixed externally.
    #[tracing::instrument(skip(self), fields(db.table = BANNERS_TABLE, db.operation = "select"))]
    pub async fn list(&self) -> AppResult<Vec<Banner>> {
        let (rows, _) = self
            .client
            .from(BANNERS_TABLE)
            .order(SortKey::asc("id"))
            .fetch()
            .await?;
        Ok(rows)
    }

    /// Replace a banner's image reference.
    #[tracing::instrument(skip(self, payload), fields(db.table = BANNERS_TABLE, db.operation = "update", db.record_id = %id))]
    pub async fn update_image(&self, id: &str, payload: &BannerPayload) -> AppResult<Banner> {
        self.client.update(BANNERS_TABLE, id, payload).await
    }
}
