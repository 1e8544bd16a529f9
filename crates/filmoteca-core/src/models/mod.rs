//! Data models for the panel
//!
//! Wire models for the catalog (`films`), banners, the ephemeral query
//! specification, and the visits dashboard RPC payload.

mod banner;
mod film;
mod query;
mod visits;

pub use banner::*;
pub use film::*;
pub use query::*;
pub use visits::*;
