use serde::{Deserialize, Serialize};

use crate::constants::{CULT_TAB, PAGE_SIZES};

/// The active catalog tab.
///
/// Every subtype tab filters on `film_type` membership; `Cult` is a
/// pseudo-tab that filters on the `cult_film` flag instead, regardless of
/// which subtype tags a record carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    Cult,
    Subtype(String),
}

impl Tab {
    /// Parse a tab label. "Culto" maps to the pseudo-tab.
    pub fn from_label(label: &str) -> Self {
        if label == CULT_TAB {
            Tab::Cult
        } else {
            Tab::Subtype(label.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One sort key of a multi-key sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

/// One explicit column filter, applied in addition to the tab predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub column: String,
    pub value: String,
}

/// Ephemeral, client-held description of one catalog query.
///
/// Owned by the query engine's caller and recomputed on every interaction
/// that changes any field; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub tab: Tab,
    /// Free-text term, matched case-insensitively across title/year/brand.
    pub search: String,
    pub filters: Vec<ColumnFilter>,
    pub sort: Vec<SortKey>,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

impl QuerySpec {
    /// Start a spec for a tab. A page size outside [`PAGE_SIZES`] falls back
    /// to the smallest allowed size.
    pub fn new(tab: Tab, page_size: u32) -> Self {
        let page_size = if PAGE_SIZES.contains(&page_size) {
            page_size
        } else {
            PAGE_SIZES[0]
        };
        Self {
            tab,
            search: String::new(),
            filters: Vec::new(),
            sort: Vec::new(),
            page: 1,
            page_size,
        }
    }

    /// Inclusive 0-indexed row range for the current page.
    pub fn range(&self) -> (u64, u64) {
        let page = self.page.max(1) as u64;
        let size = self.page_size.max(1) as u64;
        let from = (page - 1) * size;
        (from, from + size - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cult_label_maps_to_pseudo_tab() {
        assert_eq!(Tab::from_label("Culto"), Tab::Cult);
        assert_eq!(
            Tab::from_label("Pelicula"),
            Tab::Subtype("Pelicula".to_string())
        );
    }

    #[test]
    fn range_is_zero_indexed_inclusive() {
        let mut spec = QuerySpec::new(Tab::Cult, 20);
        assert_eq!(spec.range(), (0, 19));
        spec.page = 3;
        assert_eq!(spec.range(), (40, 59));
        spec.page_size = 100;
        assert_eq!(spec.range(), (200, 299));
    }

    #[test]
    fn range_tolerates_degenerate_page() {
        let mut spec = QuerySpec::new(Tab::Cult, 20);
        spec.page = 0;
        assert_eq!(spec.range(), (0, 19));
    }

    #[test]
    fn unlisted_page_size_falls_back_to_the_smallest_allowed() {
        assert_eq!(QuerySpec::new(Tab::Cult, 37).page_size, 20);
        assert_eq!(QuerySpec::new(Tab::Cult, 0).page_size, 20);
        assert_eq!(QuerySpec::new(Tab::Cult, 50).page_size, 50);
        assert_eq!(QuerySpec::new(Tab::Cult, 100).page_size, 100);
    }
}
