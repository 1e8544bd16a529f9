//! Filmoteca core library
//!
//! Shared foundation for the admin panel services: the unified `AppError`
//! type, environment-driven configuration, catalog constants (table and
//! bucket names, fixed enumerations), and the wire models for films,
//! banners, queries, and the visits dashboard.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

pub use config::PanelConfig;
pub use error::{AppError, AppResult};
