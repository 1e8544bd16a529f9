use serde::{Deserialize, Serialize};

/// A homepage promotional banner (`bannersInicio` table).
///
/// The set of banners is fixed externally; the only mutation is replacing
/// the image. `storage_key` is the raw object key backing `image_url` and
/// may be absent on rows written before keys were recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: String,
    pub image_url: String,
    #[serde(default)]
    pub storage_key: Option<String>,
}

/// Write payload for a banner image replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerPayload {
    pub image_url: String,
    pub storage_key: Option<String>,
}
