//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Filter pipeline (per-item outcomes, fallback runs, matched links)
//! - Acquisition (per-item results)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts};

use crate::filter::FilterOutcome;

// =============================================================================
// Filter Metrics
// =============================================================================

/// Filtered items by strict-pass outcome.
pub static FILTER_ITEMS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cloudsaver_filter_items_total",
            "Total items seen by the filter pipeline",
        ),
        &["outcome"], // "success", "rule_filtered", "mismatched", "errored"
    )
    .unwrap()
});

/// Batches that needed the permissive fallback pass.
pub static FILTER_FALLBACK: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "cloudsaver_filter_fallback_total",
        "Total filter batches resolved by the fallback pass",
    )
    .unwrap()
});

/// Matched links per batch after dedup.
pub static FILTER_MATCHED_LINKS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "cloudsaver_filter_matched_links",
            "Number of matched links per filter batch",
        )
        .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0]),
    )
    .unwrap()
});

// =============================================================================
// Acquisition Metrics
// =============================================================================

/// Acquisitions by result.
pub static ACQUISITIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cloudsaver_acquisitions_total", "Total acquisition attempts"),
        &["result"], // "skipped", "already_known", "not_found", "found", "failed"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Record the tallies of one filter batch.
pub fn record_filter_outcome(outcome: &FilterOutcome) {
    let counts = &outcome.counts;
    FILTER_ITEMS
        .with_label_values(&["success"])
        .inc_by(counts.success as u64);
    FILTER_ITEMS
        .with_label_values(&["rule_filtered"])
        .inc_by(counts.rule_filtered as u64);
    FILTER_ITEMS
        .with_label_values(&["mismatched"])
        .inc_by(counts.mismatched as u64);
    FILTER_ITEMS
        .with_label_values(&["errored"])
        .inc_by(counts.errored as u64);

    if outcome.used_fallback {
        FILTER_FALLBACK.inc();
    }
    FILTER_MATCHED_LINKS.observe(outcome.matched.len() as f64);
}

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(FILTER_ITEMS.clone()),
        Box::new(FILTER_FALLBACK.clone()),
        Box::new(FILTER_MATCHED_LINKS.clone()),
        Box::new(ACQUISITIONS.clone()),
    ]
}
