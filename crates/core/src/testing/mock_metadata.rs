//! Mock metadata lookup for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::media::MediaType;
use crate::metadata::{normalize_cache_key, MetadataError, MetadataLookup, MetadataRecord};

/// A recorded lookup for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLookup {
    pub title: String,
    pub subtitle: Option<String>,
    pub year: Option<u32>,
    pub type_hint: MediaType,
}

/// Mock implementation of the MetadataLookup trait.
///
/// Records are keyed by normalized title, so `"Breaking.Bad"` and
/// `"breaking bad"` hit the same entry.
///
/// # Example
///
/// ```rust,ignore
/// use cloudsaver_core::testing::{MockMetadataLookup, fixtures};
///
/// let lookup = MockMetadataLookup::new();
/// lookup.add_record("流浪地球", fixtures::movie_record("流浪地球", 2019, "535167")).await;
/// lookup.fail_title("broken").await;
/// ```
#[derive(Debug)]
pub struct MockMetadataLookup {
    records: Arc<RwLock<HashMap<String, MetadataRecord>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    lookups: Arc<RwLock<Vec<RecordedLookup>>>,
    /// If set, the next lookup fails with this error.
    next_error: Arc<RwLock<Option<MetadataError>>>,
}

impl Default for MockMetadataLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMetadataLookup {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            lookups: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Return `record` for lookups of `title`.
    pub async fn add_record(&self, title: &str, record: MetadataRecord) {
        self.records
            .write()
            .await
            .insert(normalize_cache_key(title), record);
    }

    /// Fail every lookup of `title`.
    pub async fn fail_title(&self, title: &str) {
        self.failing.write().await.insert(normalize_cache_key(title));
    }

    /// Fail the next lookup, whatever the title.
    pub async fn set_next_error(&self, error: MetadataError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn recorded_lookups(&self) -> Vec<RecordedLookup> {
        self.lookups.read().await.clone()
    }

    pub async fn recorded_titles(&self) -> Vec<String> {
        self.lookups
            .read()
            .await
            .iter()
            .map(|l| l.title.clone())
            .collect()
    }
}

#[async_trait]
impl MetadataLookup for MockMetadataLookup {
    fn name(&self) -> &str {
        "mock"
    }

    async fn resolve_metadata(
        &self,
        title: &str,
        subtitle: Option<&str>,
        year: Option<u32>,
        type_hint: MediaType,
    ) -> Result<Option<MetadataRecord>, MetadataError> {
        self.lookups.write().await.push(RecordedLookup {
            title: title.to_string(),
            subtitle: subtitle.map(str::to_string),
            year,
            type_hint,
        });

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let key = normalize_cache_key(title);
        if self.failing.read().await.contains(&key) {
            return Err(MetadataError::ApiError {
                status: 500,
                message: format!("mock failure for '{}'", title),
            });
        }

        Ok(self.records.read().await.get(&key).cloned())
    }
}
