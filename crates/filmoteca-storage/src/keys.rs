//! Shared key derivation for storage backends.
//!
//! Poster keys are namespaced by record id: `covers/{film_id}/{timestamp}.{ext}`.
//! The timestamp keeps replacements from colliding; the id namespace is why
//! the create flow must stage uploads until the remote store assigns an id.
//! Banner keys are flat: `main/{filename}`.

use chrono::Utc;
use filmoteca_core::constants::{BANNERS_PREFIX, COVERS_PREFIX};

/// Derive a poster storage key for a film.
pub fn poster_key(film_id: &str, content_type: &str) -> String {
    poster_key_at(film_id, content_type, Utc::now().timestamp_millis())
}

/// Timestamp-explicit variant of [`poster_key`].
pub fn poster_key_at(film_id: &str, content_type: &str, timestamp_millis: i64) -> String {
    format!(
        "{}/{}/{}.{}",
        COVERS_PREFIX,
        film_id,
        timestamp_millis,
        extension_for(content_type)
    )
}

/// Derive a banner storage key.
pub fn banner_key(filename: &str) -> String {
    format!("{}/{}", BANNERS_PREFIX, filename)
}

/// File extension for a MIME type. Defaults to `jpg` when the subtype is
/// missing or empty.
pub fn extension_for(content_type: &str) -> &str {
    match content_type.split_once('/') {
        Some((_, subtype)) if !subtype.is_empty() => subtype,
        _ => "jpg",
    }
}
