//! Metadata lookup against external catalogs.
//!
//! The resolver depends on [`MetadataLookup`] to turn a cleaned title into a
//! canonical record, and optionally on an [`IdCache`] for titles whose id has
//! been seen before. [`TmdbLookup`] is the production implementation.

mod cache;
mod tmdb;
mod types;

pub use cache::{normalize_cache_key, InMemoryIdCache};
pub use tmdb::{TmdbConfig, TmdbLookup};
pub use types::MetadataRecord;

use async_trait::async_trait;
use thiserror::Error;

use crate::media::MediaType;

/// Errors that can occur when looking up metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Resolves a title to a canonical metadata record.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Name of this lookup for logging.
    fn name(&self) -> &str;

    /// Look up `title`. `subtitle` is extra descriptive text that may help
    /// disambiguate. `year` and `type_hint` narrow the search when known.
    ///
    /// Returns `Ok(None)` when the catalog has no match.
    async fn resolve_metadata(
        &self,
        title: &str,
        subtitle: Option<&str>,
        year: Option<u32>,
        type_hint: MediaType,
    ) -> Result<Option<MetadataRecord>, MetadataError>;
}

/// Title to external id cache.
pub trait IdCache: Send + Sync {
    /// Look up a previously seen id by normalized title key.
    fn lookup_cached_id(&self, key: &str) -> Option<String>;
}

/// Lookup used when no catalog is configured. Never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLookup;

#[async_trait]
impl MetadataLookup for OfflineLookup {
    fn name(&self) -> &str {
        "offline"
    }

    async fn resolve_metadata(
        &self,
        _title: &str,
        _subtitle: Option<&str>,
        _year: Option<u32>,
        _type_hint: MediaType,
    ) -> Result<Option<MetadataRecord>, MetadataError> {
        Ok(None)
    }
}
