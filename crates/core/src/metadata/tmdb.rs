//! TMDB (The Movie Database) metadata lookup.
//!
//! TMDB requires an API key for access.
//! Rate limits are generous (around 40 requests per second).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cache::InMemoryIdCache;
use super::{MetadataError, MetadataLookup, MetadataRecord};
use crate::media::MediaType;
use crate::text::{extract_keywords, CjkNumerals};

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "zh-CN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// TMDB lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Language for localized titles (default: zh-CN).
    #[serde(default = "default_language")]
    pub language: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// [`MetadataLookup`] backed by the TMDB search API.
pub struct TmdbLookup {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
    cache: Option<Arc<InMemoryIdCache>>,
}

impl TmdbLookup {
    /// Create a new TMDB lookup.
    pub fn new(config: TmdbConfig) -> Result<Self, MetadataError> {
        if config.api_key.is_empty() {
            return Err(MetadataError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            language: config.language,
            cache: None,
        })
    }

    /// Record every resolved id in `cache`.
    pub fn with_cache(mut self, cache: Arc<InMemoryIdCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    async fn search_movie(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Option<MetadataRecord>, MetadataError> {
        let url = format!("{}/search/movie", self.base_url);

        debug!("TMDB movie search: query='{}', year={:?}", query, year);

        let mut request = self.client.get(&url).query(&[
            ("api_key", self.api_key.as_str()),
            ("query", query),
            ("language", self.language.as_str()),
        ]);
        if let Some(y) = year {
            request = request.query(&[("year", &y.to_string())]);
        }

        let response = check_status(request.send().await?).await?;
        let search: SearchResponse<MovieResult> = parse_json(response, "movie search").await?;

        let Some(first) = search.results.into_iter().next() else {
            return Ok(None);
        };
        let imdb_id = self.external_imdb_id("movie", first.id).await?;

        Ok(Some(MetadataRecord {
            media_type: MediaType::Movie,
            title: first.title,
            original_title: first.original_title,
            year: parse_year(first.release_date.as_deref()),
            imdb_id,
            tmdb_id: Some(first.id.to_string()),
        }))
    }

    async fn search_tv(&self, query: &str) -> Result<Option<MetadataRecord>, MetadataError> {
        let url = format!("{}/search/tv", self.base_url);

        debug!("TMDB TV search: query='{}'", query);

        let request = self.client.get(&url).query(&[
            ("api_key", self.api_key.as_str()),
            ("query", query),
            ("language", self.language.as_str()),
        ]);

        let response = check_status(request.send().await?).await?;
        let search: SearchResponse<TvResult> = parse_json(response, "TV search").await?;

        let Some(first) = search.results.into_iter().next() else {
            return Ok(None);
        };
        let imdb_id = self.external_imdb_id("tv", first.id).await?;

        Ok(Some(MetadataRecord {
            media_type: MediaType::Tv,
            title: first.name,
            original_title: first.original_name,
            year: parse_year(first.first_air_date.as_deref()),
            imdb_id,
            tmdb_id: Some(first.id.to_string()),
        }))
    }

    async fn external_imdb_id(
        &self,
        kind: &str,
        tmdb_id: u64,
    ) -> Result<Option<String>, MetadataError> {
        let url = format!("{}/{}/{}/external_ids", self.base_url, kind, tmdb_id);

        debug!("TMDB external ids: kind={}, id={}", kind, tmdb_id);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;
        let response = check_status(response).await?;
        let ids: ExternalIds = parse_json(response, "external ids").await?;

        Ok(ids.imdb_id.filter(|id| !id.is_empty()))
    }

    fn remember(&self, query: &str, record: &MetadataRecord) {
        let (Some(cache), Some(id)) = (&self.cache, &record.tmdb_id) else {
            return;
        };
        cache.insert(query, id.clone());
        cache.insert(&record.title, id.clone());
    }
}

#[async_trait]
impl MetadataLookup for TmdbLookup {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn resolve_metadata(
        &self,
        title: &str,
        subtitle: Option<&str>,
        year: Option<u32>,
        type_hint: MediaType,
    ) -> Result<Option<MetadataRecord>, MetadataError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let year = year.or_else(|| subtitle.and_then(|s| extract_keywords(s, &CjkNumerals).year));

        let record = match type_hint {
            MediaType::Movie => self.search_movie(title, year).await?,
            MediaType::Tv => self.search_tv(title).await?,
            MediaType::Unknown => match self.search_movie(title, year).await? {
                Some(record) => Some(record),
                None => self.search_tv(title).await?,
            },
        };

        if let Some(record) = &record {
            debug!(
                "TMDB resolved '{}' -> '{}' ({:?})",
                title, record.title, record.tmdb_id
            );
            self.remember(title, record);
        }

        Ok(record)
    }
}

async fn check_status(response: Response) -> Result<Response, MetadataError> {
    let status = response.status();
    if status == 401 {
        return Err(MetadataError::NotConfigured(
            "Invalid TMDB API key".to_string(),
        ));
    }
    if status == 429 {
        return Err(MetadataError::RateLimitExceeded);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MetadataError::ApiError {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(response)
}

async fn parse_json<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> Result<T, MetadataError> {
    response.json().await.map_err(|e| {
        MetadataError::ParseError(format!("Failed to parse {} response: {}", what, e))
    })
}

/// Year from a TMDB date such as `2019-02-05`.
fn parse_year(date: Option<&str>) -> Option<u32> {
    date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok())
}

// TMDB API response types

#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct MovieResult {
    id: u64,
    title: String,
    original_title: Option<String>,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TvResult {
    id: u64,
    name: String,
    original_name: Option<String>,
    first_air_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExternalIds {
    imdb_id: Option<String>,
}
