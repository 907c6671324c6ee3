//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Search lookups (outcomes, result counts)
//! - Detail fetches
//! - Catalog HTTP requests
//! - Watched list mutations and persistence

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Search Metrics
// =============================================================================

/// Lookups by outcome.
pub static LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("popcorn_lookups_total", "Total search lookups"),
        &["outcome"], // "found", "not_found", "failed", "cancelled", "skipped"
    )
    .unwrap()
});

/// Results returned per successful lookup.
pub static LOOKUP_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "popcorn_lookup_results",
            "Number of results returned per lookup",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Detail Metrics
// =============================================================================

/// Detail fetches by outcome.
pub static DETAIL_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("popcorn_detail_fetches_total", "Total detail fetches"),
        &["outcome"], // "loaded", "failed", "cancelled"
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Catalog request duration in seconds.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "popcorn_catalog_request_duration_seconds",
            "Duration of catalog HTTP requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"],
    )
    .unwrap()
});

/// Catalog requests by operation and result.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("popcorn_catalog_requests_total", "Total catalog requests"),
        &["operation", "result"],
    )
    .unwrap()
});

// =============================================================================
// Watched List Metrics
// =============================================================================

/// Watched list mutations by operation.
pub static WATCHED_MUTATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "popcorn_watched_mutations_total",
            "Total watched list mutations",
        ),
        &["operation"], // "add", "remove"
    )
    .unwrap()
});

/// Key-value store writes by result.
pub static STORE_WRITES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("popcorn_store_writes_total", "Total key-value store writes"),
        &["result"], // "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Search
        Box::new(LOOKUPS.clone()),
        Box::new(LOOKUP_RESULTS.clone()),
        // Detail
        Box::new(DETAIL_FETCHES.clone()),
        // Catalog
        Box::new(CATALOG_REQUEST_DURATION.clone()),
        Box::new(CATALOG_REQUESTS.clone()),
        // Watched
        Box::new(WATCHED_MUTATIONS.clone()),
        Box::new(STORE_WRITES.clone()),
    ]
}
