//! Configuration module
//!
//! Environment-driven configuration for the panel. The config is read once
//! at boot and handed to the clients and services by construction; nothing
//! in the workspace reads the environment after startup.

use std::env;

use crate::error::{AppError, AppResult};

const DEFAULT_PAGE_SIZE: u32 = 20;
const DEFAULT_ACTIVE_VISITS_POLL_SECS: u64 = 10;

/// Panel configuration, assembled from the environment at boot.
#[derive(Clone, Debug)]
pub struct PanelConfig {
    /// Project URL of the hosted backend (table store + primary object store).
    pub supabase_url: String,
    /// Anonymous key sent with every request to the hosted backend.
    pub supabase_anon_key: String,
    /// Bucket in the primary object store.
    pub storage_bucket: String,
    /// Endpoint of the secondary object-store mirror, if configured.
    pub mirror_endpoint: Option<String>,
    /// Bucket name in the mirror store.
    pub mirror_bucket: Option<String>,
    /// Key for the third-party movie-metadata API, if configured.
    pub metadata_api_key: Option<String>,
    /// Interval between active-visits refreshes on the dashboard.
    pub active_visits_poll_secs: u64,
    /// Page size used when the caller does not specify one.
    pub default_page_size: u32,
}

impl PanelConfig {
    /// Read configuration from the environment.
    ///
    /// `SUPABASE_URL` and `SUPABASE_ANON_KEY` are required; everything else
    /// is optional or defaulted.
    pub fn from_env() -> AppResult<Self> {
        let supabase_url = require_env("SUPABASE_URL")?;
        let supabase_anon_key = require_env("SUPABASE_ANON_KEY")?;

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
            storage_bucket: env_or("STORAGE_BUCKET", crate::constants::MEDIA_BUCKET),
            mirror_endpoint: env_opt("MIRROR_ENDPOINT"),
            mirror_bucket: env_opt("MIRROR_BUCKET"),
            metadata_api_key: env_opt("TMDB_API_KEY"),
            active_visits_poll_secs: env_parse_or(
                "ACTIVE_VISITS_POLL_SECS",
                DEFAULT_ACTIVE_VISITS_POLL_SECS,
            ),
            default_page_size: env_parse_or("DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE),
        })
    }

    /// Public base URL of the primary object store for a bucket.
    ///
    /// Derived from the configured project URL on every call; never cached,
    /// so configuration changes take effect immediately. This prefix is the
    /// ownership check for stored objects: a poster URL is ours to delete
    /// iff it starts with this base.
    pub fn storage_public_base(&self) -> String {
        format!(
            "{}/storage/v1/object/public/{}/",
            self.supabase_url, self.storage_bucket
        )
    }
}

fn require_env(key: &str) -> AppResult<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Config(format!("{} is not set", key)))
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
