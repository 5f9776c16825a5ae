//! The two-pass filter pipeline.

use tracing::{debug, info, warn};

use super::dedup::{dedup_by_link, dedup_by_message_id, expand_links};
use super::rules::LinkRules;
use super::types::ItemVerdict;
use super::{FilterConfig, FilterCounts, FilterOutcome};
use crate::matcher::{title_contained, CandidateMatcher, CandidateText};
use crate::media::{MediaQuery, ResolvedIdentity};
use crate::metrics;
use crate::resolver::ResolveRequest;
use crate::search::RawResult;
use crate::text::strip_noise;

/// Filters raw search results down to the ones that match a query.
pub struct MediaFilter {
    matcher: CandidateMatcher,
    rules: LinkRules,
    config: FilterConfig,
}

/// Items that survived the link rules, in input order.
struct StrictPass {
    matched: Vec<RawResult>,
    eligible: Vec<RawResult>,
    counts: FilterCounts,
}

impl MediaFilter {
    pub fn new(matcher: CandidateMatcher, config: FilterConfig) -> Self {
        let rules = LinkRules::new(config.enabled_cloud_types.clone());
        Self {
            matcher,
            rules,
            config,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Filter `raw_results` against `query`.
    ///
    /// Never fails: per-item problems are counted in the outcome. Items are
    /// processed in input order and the output keeps that order.
    pub async fn filter_candidates(
        &self,
        query: &MediaQuery,
        raw_results: Vec<RawResult>,
    ) -> FilterOutcome {
        if raw_results.is_empty() {
            return FilterOutcome::default();
        }

        let batch_size = raw_results.len();
        let query_identity = match self.matcher.resolver().resolve_query(query).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, title = %query.title, "Query resolution failed");
                ResolvedIdentity {
                    media_type: query.media_type,
                    year: query.year,
                    season: query.season,
                    episode: query.episode,
                    ..ResolvedIdentity::unresolved(query.title.clone())
                }
            }
        };

        let strict = self.strict_pass(&query_identity, raw_results).await;
        let counts = strict.counts;

        let mut matched = strict.matched;
        let mut used_fallback = false;
        if matched.is_empty() && self.config.fallback_enabled {
            matched = fallback_pass(&query.title, strict.eligible);
            used_fallback = true;
            debug!(
                title = %query.title,
                hits = matched.len(),
                "Strict pass matched nothing, fallback pass ran"
            );
        }

        let matched = dedup_by_link(expand_links(dedup_by_message_id(matched)));

        let outcome = FilterOutcome {
            matched,
            counts,
            used_fallback,
        };

        let per_type: Vec<String> = outcome
            .by_cloud_type()
            .iter()
            .map(|(t, entries)| format!("{}={}", t, entries.len()))
            .collect();
        info!(
            title = %query.title,
            batch = batch_size,
            success = counts.success,
            rule_filtered = counts.rule_filtered,
            mismatched = counts.mismatched,
            errored = counts.errored,
            fallback = used_fallback,
            links = ?per_type,
            "Filter batch complete"
        );

        metrics::record_filter_outcome(&outcome);
        outcome
    }

    /// Apply the link rules and both dedup passes to keyword search results,
    /// without any identity matching.
    ///
    /// Results left without an enabled link are dropped. The output has one
    /// entry per link, in input order.
    pub fn filter_resources(&self, raw_results: Vec<RawResult>) -> Vec<RawResult> {
        let total = raw_results.len();
        let kept: Vec<RawResult> = raw_results
            .into_iter()
            .filter_map(|raw| self.rules.apply(raw))
            .collect();
        let kept_count = kept.len();
        let entries = dedup_by_link(expand_links(dedup_by_message_id(kept)));

        debug!(
            total = total,
            kept = kept_count,
            links = entries.len(),
            "Filtered keyword search resources"
        );
        entries
    }

    async fn strict_pass(&self, query: &ResolvedIdentity, results: Vec<RawResult>) -> StrictPass {
        let mut pass = StrictPass {
            matched: Vec::new(),
            eligible: Vec::new(),
            counts: FilterCounts::default(),
        };

        for raw in results {
            let (verdict, kept) = self.evaluate(query, raw).await;
            pass.counts.record(&verdict);
            if let Some(item) = kept {
                if matches!(verdict, ItemVerdict::Matched(_)) {
                    pass.matched.push(item.clone());
                }
                pass.eligible.push(item);
            }
        }

        pass
    }

    /// Classify one item. Returns the rule-filtered item when it passed the
    /// link rules, whatever the match verdict.
    async fn evaluate(
        &self,
        query: &ResolvedIdentity,
        raw: RawResult,
    ) -> (ItemVerdict, Option<RawResult>) {
        if raw.title.trim().is_empty() {
            debug!(message_id = %raw.message_id, "Skipping result without title");
            return (ItemVerdict::Errored, None);
        }

        let Some(item) = self.rules.apply(raw) else {
            return (ItemVerdict::RuleFiltered, None);
        };

        let content = strip_noise(&item.content, true);
        let request = ResolveRequest::new(item.title.clone())
            .with_subtitle(content.clone())
            .with_type_hint(query.media_type);

        let candidate = match self.matcher.resolver().resolve(&request).await {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!(error = %e, title = %item.title, "Candidate resolution failed");
                return (ItemVerdict::Errored, Some(item));
            }
        };

        let text = CandidateText {
            title: &item.title,
            content: &content,
        };
        let decision = match self.matcher.match_strict(query, &candidate, text).await {
            Ok(decision) => decision,
            Err(e) => {
                warn!(error = %e, title = %item.title, "Candidate re-resolution failed");
                return (ItemVerdict::Errored, Some(item));
            }
        };

        debug!(
            title = %item.title,
            resolved = %candidate.canonical_title,
            reason = %decision.reason,
            is_match = decision.is_match,
            "Candidate decision"
        );

        let verdict = if decision.is_match {
            ItemVerdict::Matched(decision.reason)
        } else {
            ItemVerdict::Mismatched(decision.reason)
        };
        (verdict, Some(item))
    }
}

/// Permissive pass over rule-passing items using raw strings.
fn fallback_pass(query_title: &str, eligible: Vec<RawResult>) -> Vec<RawResult> {
    eligible
        .into_iter()
        .filter(|r| title_contained(query_title, &r.title, &r.content))
        .collect()
}
