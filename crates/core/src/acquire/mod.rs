//! Acquisition of share links for upstream content items.
//!
//! For one item: check history, search the result source, filter the
//! results, and record what was found.

mod types;

pub use types::{AcquireOutcome, ContentItem};

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{info, warn};

use crate::filter::MediaFilter;
use crate::history::{HistoryError, HistoryRecord, HistoryState, HistoryStore};
use crate::metrics;
use crate::search::{ResultSource, SearchError};

/// Errors from acquisition.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("history error: {0}")]
    History(#[from] HistoryError),
}

/// Drives search, filter and history for upstream items.
pub struct Acquirer {
    source: Arc<dyn ResultSource>,
    filter: Arc<MediaFilter>,
    history: Arc<dyn HistoryStore>,
}

impl Acquirer {
    pub fn new(
        source: Arc<dyn ResultSource>,
        filter: Arc<MediaFilter>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            source,
            filter,
            history,
        }
    }

    /// Acquire links for `item`.
    pub async fn acquire(&self, item: &ContentItem) -> Result<AcquireOutcome, AcquireError> {
        let result = self.acquire_inner(item).await;
        let label = match &result {
            Ok(outcome) => outcome.label(),
            Err(_) => "failed",
        };
        metrics::ACQUISITIONS.with_label_values(&[label]).inc();
        result
    }

    /// Acquire links for a batch of items, at most `concurrency` at a time.
    ///
    /// Results are returned in input order.
    pub async fn acquire_all(
        &self,
        items: &[ContentItem],
        concurrency: usize,
    ) -> Vec<Result<AcquireOutcome, AcquireError>> {
        let futures: Vec<_> = items.iter().map(|item| self.acquire(item)).collect();
        stream::iter(futures)
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    async fn acquire_inner(&self, item: &ContentItem) -> Result<AcquireOutcome, AcquireError> {
        let title = item.title.trim();
        let Some(key) = item.key().filter(|_| !title.is_empty()) else {
            return Ok(AcquireOutcome::Skipped);
        };

        if let Some(record) = self.history.get(&key)? {
            if record.state.is_settled() {
                info!(key = %key, title = %title, state = %record.state, "Already in history, skipping search");
                return Ok(AcquireOutcome::AlreadyKnown(record));
            }
        }

        info!(key = %key, title = %title, source = self.source.name(), "Searching");
        let results = match self.source.search(title).await {
            Ok(results) => results,
            Err(e) => {
                warn!(key = %key, error = %e, "Search failed");
                let mut record = HistoryRecord::new(&key, title, HistoryState::Error);
                record.content = e.to_string();
                record.image = item.image.clone();
                self.history.upsert(&record)?;
                return Err(e.into());
            }
        };

        if results.is_empty() {
            info!(key = %key, title = %title, "No search results");
            return Ok(AcquireOutcome::NotFound);
        }

        let outcome = self.filter.filter_candidates(&item.to_query(), results).await;
        let Some(first) = outcome.matched.first() else {
            info!(key = %key, title = %title, "No matching results");
            return Ok(AcquireOutcome::NotFound);
        };

        let record = HistoryRecord {
            key: key.clone(),
            title: title.to_string(),
            content: first.content.clone(),
            cloud_type: first.cloud_links.first().and_then(|l| l.cloud_type),
            state: HistoryState::Found,
            image: item.image.clone(),
            cloud_links: outcome.matched.clone(),
            added_at: Utc::now(),
        };
        self.history.upsert(&record)?;

        info!(key = %key, title = %title, links = outcome.matched.len(), "Recorded matched links");
        Ok(AcquireOutcome::Found(outcome))
    }
}
