//! Paginated catalog query engine.
//!
//! Translates one [`QuerySpec`] into exactly one remote read (tab predicate,
//! search, column filters, sort, row range, exact total) and guards against
//! out-of-order responses with a generation counter: every call to
//! [`QueryEngine::fetch`] invalidates all in-flight fetches, so a slow old
//! response can never overwrite a newer page.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use filmoteca_core::models::{Film, QuerySpec, SortKey, Tab};
use filmoteca_db::Filter;

use crate::store::CatalogStore;

/// One displayed page of catalog rows.
#[derive(Debug, Clone, Default)]
pub struct FilmPage {
    pub rows: Vec<Film>,
    /// Exact total matching the predicates, before pagination.
    pub total_count: u64,
    /// Human-readable fetch failure; set together with an empty page so the
    /// table renders an empty state instead of stale rows.
    pub error: Option<String>,
}

impl FilmPage {
    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.total_count, page_size)
    }
}

/// Outcome of one fetch.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Page(FilmPage),
    /// A newer fetch started while this one was in flight; discard.
    Stale,
}

pub struct QueryEngine {
    store: Arc<dyn CatalogStore>,
    generation: AtomicU64,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
        }
    }

    /// Run the query described by `spec`. A remote failure is absorbed into
    /// an empty page carrying the error message; only staleness is signalled
    /// out-of-band.
    pub async fn fetch(&self, spec: &QuerySpec) -> FetchOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let filters = build_filters(spec);
        let orders = build_orders(spec);
        let result = self.store.query(filters, orders, spec.range()).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            return FetchOutcome::Stale;
        }

        match result {
            Ok((rows, total_count)) => FetchOutcome::Page(FilmPage {
                rows,
                total_count,
                error: None,
            }),
            Err(err) => {
                tracing::warn!(error = %err, "catalog fetch failed");
                FetchOutcome::Page(FilmPage {
                    rows: Vec::new(),
                    total_count: 0,
                    error: Some(err.client_message()),
                })
            }
        }
    }
}

/// Predicates for one spec, AND-combined by the gateway.
///
/// The tab always contributes one predicate: the cult pseudo-tab matches the
/// `cult_film` flag, every other tab matches `film_type` membership. A
/// `film_type` column filter is suppressed on the cult tab, where the column
/// is not what the tab filters on.
pub fn build_filters(spec: &QuerySpec) -> Vec<Filter> {
    let mut filters = Vec::new();

    match &spec.tab {
        Tab::Cult => filters.push(Filter::eq("cult_film", true)),
        Tab::Subtype(subtype) => filters.push(Filter::contains("film_type", subtype)),
    }

    let term = spec.search.trim();
    if !term.is_empty() {
        filters.push(Filter::AnyIlike {
            columns: vec![
                "title".to_string(),
                "year_film".to_string(),
                "cult_brand".to_string(),
            ],
            term: term.to_string(),
        });
    }

    for column_filter in &spec.filters {
        match column_filter.column.as_str() {
            "cult_film" => {
                let flag = column_filter.value.eq_ignore_ascii_case("true");
                filters.push(Filter::eq("cult_film", flag));
            }
            "film_type" => {
                if spec.tab != Tab::Cult {
                    filters.push(Filter::contains("film_type", &column_filter.value));
                }
            }
            column => filters.push(Filter::eq(column, &column_filter.value)),
        }
    }

    filters
}

/// Sort keys for one spec. An explicit sort fully replaces the default
/// title-ascending order.
pub fn build_orders(spec: &QuerySpec) -> Vec<SortKey> {
    if spec.sort.is_empty() {
        vec![SortKey::asc("title")]
    } else {
        spec.sort.clone()
    }
}

/// Page count for a total: `ceil(total / size)`, zero rows giving zero pages.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let size = page_size.max(1) as u64;
    (total.div_ceil(size)).min(u32::MAX as u64) as u32
}

/// Clamp a 1-based page into the valid range for `total`; an empty result
/// set keeps page 1.
pub fn clamp_page(page: u32, total: u64, page_size: u32) -> u32 {
    page.clamp(1, total_pages(total, page_size).max(1))
}
