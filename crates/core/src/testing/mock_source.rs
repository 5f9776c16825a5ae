//! Mock result source for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::search::{RawResult, ResultSource, SearchError};

/// Mock implementation of the ResultSource trait.
///
/// Returns per-keyword results when configured, otherwise the default
/// result list. Every searched keyword is recorded.
#[derive(Debug)]
pub struct MockResultSource {
    /// Results returned for any keyword without a specific entry.
    results: Arc<RwLock<Vec<RawResult>>>,
    by_keyword: Arc<RwLock<HashMap<String, Vec<RawResult>>>>,
    searches: Arc<RwLock<Vec<String>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<SearchError>>>,
}

impl Default for MockResultSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockResultSource {
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
            by_keyword: Arc::new(RwLock::new(HashMap::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the results to return for subsequent searches.
    pub async fn set_results(&self, results: Vec<RawResult>) {
        *self.results.write().await = results;
    }

    /// Set the results for one keyword.
    pub async fn set_results_for(&self, keyword: &str, results: Vec<RawResult>) {
        self.by_keyword
            .write()
            .await
            .insert(keyword.to_string(), results);
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Keywords searched so far, in order.
    pub async fn recorded_searches(&self) -> Vec<String> {
        self.searches.read().await.clone()
    }

    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }
}

#[async_trait]
impl ResultSource for MockResultSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, keyword: &str) -> Result<Vec<RawResult>, SearchError> {
        self.searches.write().await.push(keyword.to_string());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        if let Some(results) = self.by_keyword.read().await.get(keyword) {
            return Ok(results.clone());
        }
        Ok(self.results.read().await.clone())
    }
}
