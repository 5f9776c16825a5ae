use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matcher::MatchReason;
use crate::search::{CloudType, RawResult};

/// Per-batch tallies from the strict pass.
///
/// Every input item lands in exactly one bucket, so the four counts sum to
/// the batch size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCounts {
    pub success: usize,
    pub rule_filtered: usize,
    pub mismatched: usize,
    pub errored: usize,
}

impl FilterCounts {
    pub fn total(&self) -> usize {
        self.success + self.rule_filtered + self.mismatched + self.errored
    }

    pub(crate) fn record(&mut self, verdict: &ItemVerdict) {
        match verdict {
            ItemVerdict::Matched(_) => self.success += 1,
            ItemVerdict::RuleFiltered => self.rule_filtered += 1,
            ItemVerdict::Mismatched(_) => self.mismatched += 1,
            ItemVerdict::Errored => self.errored += 1,
        }
    }
}

/// What happened to one item in the strict pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemVerdict {
    Matched(MatchReason),
    RuleFiltered,
    Mismatched(MatchReason),
    Errored,
}

/// Result of filtering one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOutcome {
    /// Matched results, one link per entry, deduplicated.
    pub matched: Vec<RawResult>,
    pub counts: FilterCounts,
    /// The strict pass found nothing and the permissive title pass ran.
    pub used_fallback: bool,
}

impl FilterOutcome {
    /// Matched entries grouped by cloud provider.
    pub fn by_cloud_type(&self) -> BTreeMap<CloudType, Vec<&RawResult>> {
        let mut groups: BTreeMap<CloudType, Vec<&RawResult>> = BTreeMap::new();
        for result in &self.matched {
            for link in &result.cloud_links {
                if let Some(cloud_type) = link.cloud_type {
                    groups.entry(cloud_type).or_default().push(result);
                }
            }
        }
        groups
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}
