//! Filmoteca data gateway
//!
//! Typed client for the hosted table store. The `client` module speaks the
//! backend's REST dialect (predicates, ordering, ranges, exact counts, RPC);
//! the repository modules expose typed operations on `films`,
//! `bannersInicio`, and the visits procedure. Nothing outside this crate
//! sees the wire format.

pub mod banners;
pub mod client;
pub mod films;
pub mod query;
pub mod visits;

pub use banners::BannerRepository;
pub use client::SupabaseClient;
pub use films::FilmRepository;
pub use query::{Filter, TableQuery};
pub use visits::VisitsRepository;
