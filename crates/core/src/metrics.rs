//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Library mutations (favorites, watchlist, history)
//! - Storage backend failures
//! - Catalog queries

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Library
// =============================================================================

/// Library mutations by collection and outcome.
pub static LIBRARY_MUTATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediax_library_mutations_total",
            "Total successful library mutations",
        ),
        &["collection", "outcome"], // outcome: "added", "removed", "saved", "restored"
    )
    .unwrap()
});

/// Mutations rejected before reaching storage.
pub static LIBRARY_REJECTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mediax_library_rejections_total",
            "Library mutations rejected for invalid arguments",
        ),
        &["collection"],
    )
    .unwrap()
});

// =============================================================================
// Storage
// =============================================================================

/// Storage backend failures by operation.
pub static STORAGE_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mediax_storage_errors_total", "Total storage backend errors"),
        &["operation"], // "read", "write", "remove"
    )
    .unwrap()
});

// =============================================================================
// Catalog
// =============================================================================

/// Catalog queries by kind.
pub static CATALOG_QUERIES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mediax_catalog_queries_total", "Total catalog queries"),
        &["kind"], // "browse", "search", "similar"
    )
    .unwrap()
});

/// Result counts per catalog query.
pub static CATALOG_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mediax_catalog_results",
            "Number of records returned per catalog query",
        )
        .buckets(vec![0.0, 1.0, 5.0, 8.0, 20.0, 50.0, 100.0, 500.0]),
        &["kind"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Library
        Box::new(LIBRARY_MUTATIONS.clone()),
        Box::new(LIBRARY_REJECTIONS.clone()),
        // Storage
        Box::new(STORAGE_ERRORS.clone()),
        // Catalog
        Box::new(CATALOG_QUERIES.clone()),
        Box::new(CATALOG_RESULTS.clone()),
    ]
}
