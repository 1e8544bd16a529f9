//! HTTP client for the hosted table store.
//!
//! One `SupabaseClient` is constructed at boot from `PanelConfig` and
//! injected into every repository; there is no module-level singleton.

use std::time::Duration;

use filmoteca_core::{AppError, AppResult, PanelConfig};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::query::TableQuery;

const HTTP_TIMEOUT_SECS: u64 = 60;

/// Client for the hosted backend's table REST API.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: String, anon_key: String) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    pub fn from_config(config: &PanelConfig) -> AppResult<Self> {
        Self::new(
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.anon_key)
            .header("apikey", &self.anon_key)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Start a read query against a table.
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }

    /// Insert one row; returns the created row (server-assigned fields
    /// included).
    pub async fn insert<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> AppResult<T> {
        let request = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(body);

        let response = request.send().await?;
        let mut rows: Vec<T> = Self::read_json(response).await?;
        rows.pop()
            .ok_or_else(|| AppError::Remote("insert returned no row".to_string()))
    }

    /// Update the row with the given id; returns the updated row.
    pub async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        id: &str,
        patch: &B,
    ) -> AppResult<T> {
        let request = self
            .authed(self.client.patch(self.table_url(table)))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(patch);

        let response = request.send().await?;
        let mut rows: Vec<T> = Self::read_json(response).await?;
        rows.pop()
            .ok_or_else(|| AppError::NotFound(format!("row {} not found in {}", id, table)))
    }

    /// Delete the row with the given id.
    pub async fn delete(&self, table: &str, id: &str) -> AppResult<()> {
        let request = self
            .authed(self.client.delete(self.table_url(table)))
            .query(&[("id", format!("eq.{}", id))]);

        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Call a stored procedure and deserialize its result.
    pub async fn rpc<T: DeserializeOwned>(&self, name: &str) -> AppResult<T> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, name);
        let request = self
            .authed(self.client.post(url))
            .json(&serde_json::json!({}));

        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn check_status(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Remote(remote_message(status.as_u16(), &body)))
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Extract the server's human-readable message from an error body, falling
/// back to the raw body.
fn remote_message(status: u16, body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| body.to_string());
    format!("status {}: {}", status, message)
}
