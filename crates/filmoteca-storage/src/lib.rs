//! Filmoteca storage library
//!
//! Object-store abstraction for the panel. Two backends implement the
//! `ObjectStore` trait: the primary database-integrated store (posters and
//! banners live there, under the configured bucket) and a secondary mirror
//! reached through a multipart upload endpoint.
//!
//! # Key format
//!
//! Keys are derived centrally in the `keys` module so both backends and the
//! ownership check stay consistent:
//!
//! - **Posters**: `covers/{film_id}/{timestamp}.{ext}`
//! - **Banners**: `main/{filename}`

pub mod keys;
pub mod mirror;
pub mod supabase;
pub mod traits;

pub use mirror::MirrorStore;
pub use supabase::SupabaseStorage;
pub use traits::{ObjectStore, StorageError, StorageResult};
