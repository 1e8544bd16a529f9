//! Visits dashboard stored procedure.

use filmoteca_core::constants::VISITS_RPC;
use filmoteca_core::models::VisitsDashboard;
use filmoteca_core::AppResult;

use crate::client::SupabaseClient;

#[derive(Clone, Debug)]
pub struct VisitsRepository {
    client: SupabaseClient,
}

impl VisitsRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// One call to `get_visitas_dashboard`: summary counters + daily series.
    #[tracing::instrument(skip(self), fields(db.operation = "rpc", db.procedure = VISITS_RPC))]
    pub async fn fetch(&self) -> AppResult<VisitsDashboard> {
        self.client.rpc(VISITS_RPC).await
    }
}
