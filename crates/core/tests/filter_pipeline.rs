//! Filter pipeline integration tests.
//!
//! These tests drive `MediaFilter::filter_candidates` end to end with a mock
//! metadata lookup:
//! - Strict tiers and per-item counts
//! - Fallback trigger and link rules
//! - Deduplication and link expansion
//! - Collaborator failures counted, never propagated

use std::sync::Arc;

use cloudsaver_core::{
    testing::{fixtures, MockMetadataLookup},
    CandidateMatcher, CloudLink, CloudType, FilterConfig, IdentityResolver, InMemoryIdCache,
    MediaFilter, MediaQuery, MediaType, MetadataError, RawResult,
};

/// Test helper wiring a filter to a mock lookup.
struct TestHarness {
    filter: MediaFilter,
    lookup: Arc<MockMetadataLookup>,
}

impl TestHarness {
    async fn new() -> Self {
        Self::with_config(FilterConfig::default()).await
    }

    async fn with_config(config: FilterConfig) -> Self {
        Self::build(config, None).await
    }

    async fn build(config: FilterConfig, cache: Option<Arc<InMemoryIdCache>>) -> Self {
        let lookup = Arc::new(MockMetadataLookup::new());
        lookup
            .add_record("流浪地球", fixtures::movie_record("流浪地球", 2019, "535167"))
            .await;
        lookup
            .add_record("球状闪电", fixtures::movie_record("球状闪电", 2024, "999001"))
            .await;
        lookup
            .add_record("三体", fixtures::tv_record("三体", 2023, "108545"))
            .await;

        let mut resolver = IdentityResolver::new(lookup.clone());
        if let Some(cache) = cache {
            resolver = resolver.with_cache(cache);
        }
        let matcher = CandidateMatcher::new(Arc::new(resolver));

        Self {
            filter: MediaFilter::new(matcher, config),
            lookup,
        }
    }
}

fn movie_query() -> MediaQuery {
    MediaQuery::new("流浪地球", MediaType::Movie)
}

fn links(result: &RawResult) -> Vec<&str> {
    result.cloud_links.iter().map(|l| l.link.as_str()).collect()
}

// =============================================================================
// Strict pass
// =============================================================================

#[tokio::test]
async fn test_strict_pass_matches_same_tmdb_id() {
    let harness = TestHarness::new().await;
    let results = vec![
        fixtures::tianyi_result("1", "流浪地球 (2019)", "a"),
        fixtures::tianyi_result("2", "球状闪电", "b"),
    ];

    let outcome = harness.filter.filter_candidates(&movie_query(), results).await;

    assert!(!outcome.used_fallback);
    assert_eq!(outcome.matched.len(), 1);
    assert_eq!(outcome.matched[0].message_id, "1");
    assert_eq!(outcome.counts.success, 1);
    assert_eq!(outcome.counts.mismatched, 1);
}

#[tokio::test]
async fn test_type_mismatch_is_rejected() {
    let harness = TestHarness::new().await;
    let results = vec![fixtures::tianyi_result("1", "三体", "a")];

    let outcome = harness.filter.filter_candidates(&movie_query(), results).await;

    assert_eq!(outcome.counts.success, 0);
    assert_eq!(outcome.counts.mismatched, 1);
}

#[tokio::test]
async fn test_imdb_id_exact_skips_re_resolution() {
    let harness = TestHarness::new().await;
    let mut record = fixtures::movie_record("流浪地球", 2019, "535167");
    record.imdb_id = Some("tt7605074".to_string());
    harness.lookup.add_record("流浪地球", record).await;

    let query = MediaQuery::new("流浪地球", MediaType::Movie).with_imdb_id("tt7605074");
    let results = vec![fixtures::tianyi_result("1", "流浪地球", "a")];

    let outcome = harness.filter.filter_candidates(&query, results).await;

    assert_eq!(outcome.counts.success, 1);
    // Query ids short-circuit its lookup; the candidate is resolved once and
    // never re-resolved.
    assert_eq!(harness.lookup.recorded_titles().await, vec!["流浪地球"]);
}

#[tokio::test]
async fn test_cache_hit_accepts_without_re_resolution() {
    let cache = Arc::new(InMemoryIdCache::new());
    cache.insert("流浪地球", "535167");
    let harness = TestHarness::build(FilterConfig::default(), Some(cache)).await;

    let results = vec![fixtures::tianyi_result("1", "流浪地球", "a")];
    let outcome = harness.filter.filter_candidates(&movie_query(), results).await;

    assert_eq!(outcome.counts.success, 1);
    // One lookup for the query, one for the candidate.
    assert_eq!(harness.lookup.recorded_lookups().await.len(), 2);
}

#[tokio::test]
async fn test_candidate_resolves_with_query_type_hint() {
    let harness = TestHarness::new().await;
    let query = MediaQuery::new("三体", MediaType::Tv);
    let results = vec![fixtures::tianyi_result("1", "三体", "a")];

    harness.filter.filter_candidates(&query, results).await;

    let lookups = harness.lookup.recorded_lookups().await;
    assert!(lookups.iter().all(|l| l.type_hint == MediaType::Tv));
}

// =============================================================================
// Counts and failures
// =============================================================================

#[tokio::test]
async fn test_counts_sum_to_batch_size() {
    let harness = TestHarness::new().await;
    harness.lookup.fail_title("坏掉的标题").await;

    let results = vec![
        fixtures::tianyi_result("1", "流浪地球", "a"),
        fixtures::quark_result("2", "流浪地球", "b"),
        fixtures::tianyi_result("3", "球状闪电", "c"),
        fixtures::tianyi_result("4", "坏掉的标题", "d"),
        fixtures::tianyi_result("5", "   ", "e"),
    ];

    let outcome = harness.filter.filter_candidates(&movie_query(), results).await;

    assert_eq!(outcome.counts.success, 1);
    assert_eq!(outcome.counts.rule_filtered, 1);
    assert_eq!(outcome.counts.mismatched, 1);
    assert_eq!(outcome.counts.errored, 2);
    assert_eq!(outcome.counts.total(), 5);
}

#[tokio::test]
async fn test_query_lookup_failure_is_not_fatal() {
    let harness = TestHarness::new().await;
    harness
        .lookup
        .set_next_error(MetadataError::RateLimitExceeded)
        .await;

    let results = vec![fixtures::tianyi_result("1", "流浪地球 4K", "a")];
    let outcome = harness.filter.filter_candidates(&movie_query(), results).await;

    // The unresolved query matches nothing strictly; the fallback still finds
    // the title.
    assert_eq!(outcome.counts.total(), 1);
    assert!(outcome.used_fallback);
    assert_eq!(outcome.matched.len(), 1);
}

#[tokio::test]
async fn test_empty_batch_is_noop() {
    let harness = TestHarness::new().await;

    let outcome = harness.filter.filter_candidates(&movie_query(), Vec::new()).await;

    assert!(outcome.is_empty());
    assert_eq!(outcome.counts.total(), 0);
    assert!(!outcome.used_fallback);
    assert!(harness.lookup.recorded_lookups().await.is_empty());
}

// =============================================================================
// Fallback
// =============================================================================

#[tokio::test]
async fn test_fallback_runs_when_strict_pass_is_empty() {
    let harness = TestHarness::new().await;
    let results = vec![
        fixtures::tianyi_result("1", "流浪地球 4K 高码", "a"),
        fixtures::tianyi_result("2", "别的电影合集", "b"),
    ];

    let outcome = harness.filter.filter_candidates(&movie_query(), results).await;

    assert!(outcome.used_fallback);
    assert_eq!(outcome.counts.success, 0);
    assert_eq!(outcome.matched.len(), 1);
    assert_eq!(outcome.matched[0].message_id, "1");
}

#[tokio::test]
async fn test_fallback_checks_content() {
    let harness = TestHarness::new().await;
    let mut result = fixtures::tianyi_result("1", "2019 科幻 合集", "a");
    result.content = "包含：流浪地球、疯狂的外星人".to_string();

    let outcome = harness
        .filter
        .filter_candidates(&movie_query(), vec![result])
        .await;

    assert!(outcome.used_fallback);
    assert_eq!(outcome.matched.len(), 1);
}

#[tokio::test]
async fn test_fallback_skipped_when_strict_pass_matches() {
    let harness = TestHarness::new().await;
    let results = vec![
        fixtures::tianyi_result("1", "流浪地球", "a"),
        fixtures::tianyi_result("2", "流浪地球 4K 高码", "b"),
    ];

    let outcome = harness.filter.filter_candidates(&movie_query(), results).await;

    assert!(!outcome.used_fallback);
    assert_eq!(outcome.matched.len(), 1);
    assert_eq!(outcome.matched[0].message_id, "1");
}

#[tokio::test]
async fn test_fallback_ignores_rule_filtered_items() {
    let harness = TestHarness::new().await;
    let results = vec![fixtures::quark_result("1", "流浪地球 4K", "a")];

    let outcome = harness.filter.filter_candidates(&movie_query(), results).await;

    assert!(outcome.used_fallback);
    assert!(outcome.is_empty());
    assert_eq!(outcome.counts.rule_filtered, 1);
}

#[tokio::test]
async fn test_fallback_disabled() {
    let config = FilterConfig {
        fallback_enabled: false,
        ..Default::default()
    };
    let harness = TestHarness::with_config(config).await;
    let results = vec![fixtures::tianyi_result("1", "流浪地球 4K 高码", "a")];

    let outcome = harness.filter.filter_candidates(&movie_query(), results).await;

    assert!(!outcome.used_fallback);
    assert!(outcome.is_empty());
}

// =============================================================================
// Link rules, expansion and dedup
// =============================================================================

#[tokio::test]
async fn test_links_expanded_and_deduplicated() {
    let harness = TestHarness::new().await;
    let mut multi = fixtures::tianyi_result("1", "流浪地球", "a");
    multi.cloud_links.push(CloudLink::new(
        Some(CloudType::Tianyi),
        "https://cloud.189.cn/t/b",
    ));
    multi.cloud_links.push(CloudLink::new(
        Some(CloudType::Quark),
        "https://pan.quark.cn/s/q",
    ));
    let duplicate_message = fixtures::tianyi_result("1", "流浪地球", "z");
    let duplicate_link = fixtures::tianyi_result("2", "流浪地球 (2019)", "a");

    let outcome = harness
        .filter
        .filter_candidates(&movie_query(), vec![multi, duplicate_message, duplicate_link])
        .await;

    let matched: Vec<Vec<&str>> = outcome.matched.iter().map(links).collect();
    assert_eq!(
        matched,
        vec![
            vec!["https://cloud.189.cn/t/a"],
            vec!["https://cloud.189.cn/t/b"],
        ]
    );
    assert!(outcome.matched.iter().all(|r| r.message_id == "1"));
}

#[tokio::test]
async fn test_untyped_links_are_inferred_from_domain() {
    let config = FilterConfig {
        enabled_cloud_types: vec![CloudType::Quark],
        ..Default::default()
    };
    let harness = TestHarness::with_config(config).await;
    let result = RawResult {
        message_id: "1".to_string(),
        title: "流浪地球".to_string(),
        content: String::new(),
        cloud_links: vec![CloudLink::new(None, "https://pan.quark.cn/s/abc")],
    };

    let outcome = harness
        .filter
        .filter_candidates(&movie_query(), vec![result])
        .await;

    assert_eq!(outcome.matched.len(), 1);
    assert_eq!(
        outcome.matched[0].cloud_links[0].cloud_type,
        Some(CloudType::Quark)
    );
    assert_eq!(outcome.by_cloud_type()[&CloudType::Quark].len(), 1);
}

#[tokio::test]
async fn test_two_cloud_types_expand_to_two_entries() {
    let config = FilterConfig {
        enabled_cloud_types: vec![CloudType::Tianyi, CloudType::Quark],
        ..Default::default()
    };
    let harness = TestHarness::with_config(config).await;
    let mut result = fixtures::tianyi_result("1", "流浪地球", "a");
    result.cloud_links.push(CloudLink::new(
        Some(CloudType::Quark),
        "https://pan.quark.cn/s/q",
    ));

    let outcome = harness
        .filter
        .filter_candidates(&movie_query(), vec![result])
        .await;

    assert_eq!(outcome.matched.len(), 2);
    assert!(outcome.matched.iter().all(|r| r.cloud_links.len() == 1));
    let groups = outcome.by_cloud_type();
    assert_eq!(groups[&CloudType::Tianyi].len(), 1);
    assert_eq!(groups[&CloudType::Quark].len(), 1);
}

#[tokio::test]
async fn test_filter_resources_skips_identity_matching() {
    let harness = TestHarness::new().await;
    let mut multi = fixtures::tianyi_result("1", "完全无关的标题", "a");
    multi.cloud_links.push(CloudLink::new(None, "https://cloud.189.cn/t/b"));
    let quark_only = fixtures::quark_result("2", "流浪地球", "q");
    let duplicate_message = fixtures::tianyi_result("1", "完全无关的标题", "z");
    let duplicate_link = fixtures::tianyi_result("3", "另一个标题", "b");
    let fresh = fixtures::tianyi_result("", "没有消息编号", "c");

    let entries = harness.filter.filter_resources(vec![
        multi,
        quark_only,
        duplicate_message,
        duplicate_link,
        fresh,
    ]);

    let all: Vec<Vec<&str>> = entries.iter().map(links).collect();
    assert_eq!(
        all,
        vec![
            vec!["https://cloud.189.cn/t/a"],
            vec!["https://cloud.189.cn/t/b"],
            vec!["https://cloud.189.cn/t/c"],
        ]
    );
    assert_eq!(entries[1].cloud_links[0].cloud_type, Some(CloudType::Tianyi));
    assert!(harness.lookup.recorded_lookups().await.is_empty());
}

// =============================================================================
// Unresolvable titles and absent markers
// =============================================================================

#[tokio::test]
async fn test_unresolvable_title_matches_by_containment() {
    let harness = TestHarness::new().await;
    let query = MediaQuery::new("未知影片XYZ", MediaType::Movie);
    let results = vec![
        fixtures::tianyi_result("1", "未知影片XYZ 1080p", "a"),
        fixtures::tianyi_result("2", "别的东西", "b"),
    ];

    let outcome = harness.filter.filter_candidates(&query, results).await;

    assert!(outcome.used_fallback);
    assert_eq!(outcome.counts.mismatched, 2);
    assert_eq!(outcome.matched.len(), 1);
    assert_eq!(outcome.matched[0].message_id, "1");
}

#[tokio::test]
async fn test_missing_candidate_season_still_matches() {
    let harness = TestHarness::new().await;
    // Without TMDB ids the decision falls to title, year and season rules.
    let mut record = fixtures::tv_record("Show A", 2020, "unused");
    record.tmdb_id = None;
    harness.lookup.add_record("Show A", record).await;

    let query = MediaQuery::new("Show A", MediaType::Tv).with_season(2);
    let results = vec![
        fixtures::tianyi_result("1", "Show A", "a"),
        fixtures::tianyi_result("2", "Show A Season 3", "b"),
    ];

    let outcome = harness.filter.filter_candidates(&query, results).await;

    assert!(!outcome.used_fallback);
    assert_eq!(outcome.matched.len(), 1);
    assert_eq!(outcome.matched[0].message_id, "1");
}
