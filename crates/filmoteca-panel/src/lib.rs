//! Filmoteca panel services
//!
//! The admin panel's working logic: the paginated catalog query engine, the
//! poster image lifecycle (dual object stores, ownership-checked cleanup),
//! the record draft and its save state machine, sequential bulk delete,
//! banner replacement, the movie-metadata search client, and the visits
//! dashboard service. The presentation layer consumes these services and
//! relays user intents back into them; it holds no logic of its own.

pub mod banners;
pub mod bulk;
pub mod dashboard;
pub mod draft;
pub mod metadata;
pub mod posters;
pub mod query_engine;
pub mod save;
pub mod store;

pub use banners::{BannerReplaceReport, BannerService};
pub use bulk::{BulkDeleter, BulkDeleteSummary};
pub use dashboard::{DashboardService, VisitsSource};
pub use draft::FilmDraft;
pub use metadata::{MetadataClient, MetadataMovie, MetadataPage};
pub use posters::{PosterChange, PosterLifecycle, PosterOutcome};
pub use query_engine::{FetchOutcome, FilmPage, QueryEngine};
pub use save::{SaveReport, SaveState, SaveWorkflow};
pub use store::{BannerStore, CatalogStore};
