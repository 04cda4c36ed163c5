//! A loaded catalog plus the configured browsing limits.

use serde::{Deserialize, Serialize};

use super::loader::load_catalog;
use super::query::{filter, find_by_id, paginate, search_with_limit, similar, sort};
use super::sections::{section_items, Section};
use super::types::{FilterCriteria, Page, SortKey};
use crate::config::CatalogConfig;
use crate::content::ContentRecord;
use crate::metrics::{CATALOG_QUERIES, CATALOG_RESULTS};

/// What a listing page asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseRequest {
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    pub sort: SortKey,
    /// How many pages are revealed ("load more" presses + 1).
    #[serde(default = "default_pages_shown")]
    pub pages_shown: usize,
}

impl Default for BrowseRequest {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: SortKey::default(),
            pages_shown: default_pages_shown(),
        }
    }
}

fn default_pages_shown() -> usize {
    1
}

/// Read-only catalog with the query operations wired to configured limits.
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    records: Vec<ContentRecord>,
    page_size: usize,
    search_limit: usize,
    similar_limit: usize,
}

impl CatalogBrowser {
    pub fn new(records: Vec<ContentRecord>, config: &CatalogConfig) -> Self {
        Self {
            records,
            page_size: config.page_size,
            search_limit: config.search_limit,
            similar_limit: config.similar_limit,
        }
    }

    /// Load the configured catalog file. A missing or corrupt file gives an
    /// empty catalog.
    pub async fn load(config: &CatalogConfig) -> Self {
        Self::new(load_catalog(&config.path).await, config)
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Filter, then sort, then paginate.
    pub fn browse(&self, request: &BrowseRequest) -> Page {
        let matched = filter(&self.records, &request.criteria);
        let sorted = sort(&matched, request.sort);
        let page = paginate(&sorted, self.page_size, request.pages_shown);
        record_query("browse", page.items.len());
        page
    }

    /// Quick-search overlay results.
    pub fn search(&self, query: &str) -> Vec<ContentRecord> {
        let results = search_with_limit(&self.records, query, self.search_limit);
        record_query("search", results.len());
        results
    }

    pub fn find(&self, id: &str) -> Option<&ContentRecord> {
        find_by_id(&self.records, id)
    }

    pub fn similar(&self, id: &str) -> Vec<ContentRecord> {
        let results = similar(&self.records, id, self.similar_limit);
        record_query("similar", results.len());
        results
    }

    pub fn section(&self, section: Section) -> Vec<ContentRecord> {
        section_items(&self.records, section)
    }
}

fn record_query(kind: &str, results: usize) {
    CATALOG_QUERIES.with_label_values(&[kind]).inc();
    CATALOG_RESULTS
        .with_label_values(&[kind])
        .observe(results as f64);
}
