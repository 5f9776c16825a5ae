//! Deduplication and link expansion of matched results.

use std::collections::HashSet;

use crate::search::RawResult;

/// Keep the first result per non-empty message id.
///
/// Results with an empty message id cannot be compared and are all kept.
pub fn dedup_by_message_id(results: Vec<RawResult>) -> Vec<RawResult> {
    let mut seen: HashSet<String> = HashSet::new();
    results
        .into_iter()
        .filter(|r| r.message_id.is_empty() || seen.insert(r.message_id.clone()))
        .collect()
}

/// Split each result into one entry per link, other fields duplicated.
///
/// Results without links produce nothing.
pub fn expand_links(results: Vec<RawResult>) -> Vec<RawResult> {
    let mut expanded = Vec::with_capacity(results.len());
    for result in results {
        for link in &result.cloud_links {
            expanded.push(RawResult {
                message_id: result.message_id.clone(),
                title: result.title.clone(),
                content: result.content.clone(),
                cloud_links: vec![link.clone()],
            });
        }
    }
    expanded
}

/// Keep the first entry per non-empty link string.
///
/// Expects expanded entries; only the first link of each entry is compared.
pub fn dedup_by_link(results: Vec<RawResult>) -> Vec<RawResult> {
    let mut seen: HashSet<String> = HashSet::new();
    results
        .into_iter()
        .filter(|r| match r.cloud_links.first() {
            Some(link) if !link.link.is_empty() => seen.insert(link.link.clone()),
            _ => true,
        })
        .collect()
}
