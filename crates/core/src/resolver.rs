//! Media identity resolution.
//!
//! Turns a raw title (plus optional subtitle and hints) into a
//! [`ResolvedIdentity`] by extracting markers from the text and asking a
//! [`MetadataLookup`] for the canonical record.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::media::{MediaQuery, MediaType, ResolvedIdentity};
use crate::metadata::{normalize_cache_key, IdCache, MetadataError, MetadataLookup, MetadataRecord};
use crate::text::{contains_chinese, extract_keywords, strip_noise, CjkNumerals, NumeralNormalizer};

/// Errors from identity resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("metadata lookup '{lookup}' failed: {source}")]
    Lookup {
        lookup: String,
        #[source]
        source: MetadataError,
    },
}

/// Input to [`IdentityResolver::resolve`].
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    pub title: String,
    pub subtitle: Option<String>,
    pub type_hint: MediaType,
    /// Known release year. Wins over a year parsed from the text.
    pub year: Option<u32>,
    pub imdb_id: Option<String>,
    pub tmdb_id: Option<String>,
    /// Use the first Chinese-script title of the record as canonical title.
    pub prefer_chinese_title: bool,
}

impl ResolveRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prefer_chinese_title: true,
            ..Default::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_type_hint(mut self, type_hint: MediaType) -> Self {
        self.type_hint = type_hint;
        self
    }

    pub fn with_year(mut self, year: Option<u32>) -> Self {
        self.year = year;
        self
    }

    pub fn with_ids(mut self, imdb_id: Option<String>, tmdb_id: Option<String>) -> Self {
        self.imdb_id = imdb_id.filter(|id| !id.is_empty());
        self.tmdb_id = tmdb_id.filter(|id| !id.is_empty());
        self
    }

    pub fn prefer_chinese_title(mut self, prefer: bool) -> Self {
        self.prefer_chinese_title = prefer;
        self
    }
}

/// Markers gathered from title and subtitle before any lookup.
struct TextMarkers {
    clean_title: String,
    media_type: MediaType,
    year: Option<u32>,
    season: Option<u32>,
    episode: Option<u32>,
}

/// Resolves titles to canonical identities.
pub struct IdentityResolver {
    lookup: Arc<dyn MetadataLookup>,
    cache: Option<Arc<dyn IdCache>>,
    numerals: Arc<dyn NumeralNormalizer>,
}

impl IdentityResolver {
    pub fn new(lookup: Arc<dyn MetadataLookup>) -> Self {
        Self {
            lookup,
            cache: None,
            numerals: Arc::new(CjkNumerals),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn IdCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_numerals(mut self, numerals: Arc<dyn NumeralNormalizer>) -> Self {
        self.numerals = numerals;
        self
    }

    /// Cached external id for `title`, if any.
    pub fn cached_id(&self, title: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        let key = normalize_cache_key(title);
        if key.is_empty() {
            return None;
        }
        cache.lookup_cached_id(&key)
    }

    /// Resolve a raw title.
    ///
    /// A catalog miss yields an unresolved identity (`MediaType::Unknown`),
    /// not an error. Only a failing lookup is an error.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<ResolvedIdentity, ResolveError> {
        let markers = self.markers(request);

        if request.imdb_id.is_some() || request.tmdb_id.is_some() {
            debug!(
                "Known ids for '{}', skipping lookup (imdb={:?}, tmdb={:?})",
                markers.clean_title, request.imdb_id, request.tmdb_id
            );
            return Ok(ResolvedIdentity {
                media_type: markers.media_type,
                canonical_title: markers.clean_title,
                original_title: None,
                year: markers.year,
                season: markers.season,
                episode: markers.episode,
                imdb_id: request.imdb_id.clone(),
                tmdb_id: request.tmdb_id.clone(),
            });
        }

        if markers.clean_title.is_empty() {
            return Ok(unresolved(markers));
        }

        let record = self
            .lookup
            .resolve_metadata(
                &markers.clean_title,
                request.subtitle.as_deref(),
                markers.year,
                markers.media_type,
            )
            .await
            .map_err(|source| ResolveError::Lookup {
                lookup: self.lookup.name().to_string(),
                source,
            })?;

        match record {
            Some(record) => Ok(from_record(markers, record, request.prefer_chinese_title)),
            None => {
                debug!("No metadata for '{}'", markers.clean_title);
                Ok(unresolved(markers))
            }
        }
    }

    /// Resolve the query side. Explicit query fields win over parsed ones.
    pub async fn resolve_query(&self, query: &MediaQuery) -> Result<ResolvedIdentity, ResolveError> {
        let mut request = ResolveRequest::new(query.title.clone())
            .with_type_hint(query.media_type)
            .with_year(query.year)
            .with_ids(query.imdb_id.clone(), query.tmdb_id.clone());
        if let Some(subtitle) = &query.subtitle_hint {
            request = request.with_subtitle(subtitle.clone());
        }

        let mut identity = self.resolve(&request).await?;
        if !identity.is_resolved() && query.media_type.is_known() {
            identity.media_type = query.media_type;
        }
        if query.year.is_some() {
            identity.year = query.year;
        }
        if query.season.is_some() {
            identity.season = query.season;
        }
        if query.episode.is_some() {
            identity.episode = query.episode;
        }
        Ok(identity)
    }

    fn markers(&self, request: &ResolveRequest) -> TextMarkers {
        let numerals = self.numerals.as_ref();
        let title_kw = extract_keywords(&request.title, numerals);
        let subtitle_kw = request
            .subtitle
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| extract_keywords(s, numerals))
            .unwrap_or_default();

        let media_type = if request.type_hint.is_known() {
            request.type_hint
        } else {
            title_kw
                .media_type
                .or(subtitle_kw.media_type)
                .unwrap_or_default()
        };

        TextMarkers {
            clean_title: strip_noise(&title_kw.remainder, true),
            media_type,
            year: request.year.or(title_kw.year).or(subtitle_kw.year),
            season: title_kw.season.or(subtitle_kw.season),
            episode: title_kw.episode.or(subtitle_kw.episode),
        }
    }
}

fn unresolved(markers: TextMarkers) -> ResolvedIdentity {
    ResolvedIdentity {
        year: markers.year,
        season: markers.season,
        episode: markers.episode,
        ..ResolvedIdentity::unresolved(markers.clean_title)
    }
}

fn from_record(markers: TextMarkers, record: MetadataRecord, prefer_chinese: bool) -> ResolvedIdentity {
    let media_type = if record.media_type.is_known() {
        record.media_type
    } else {
        markers.media_type
    };

    let canonical_title = if prefer_chinese {
        chinese_title(&record).unwrap_or_else(|| record.title.clone())
    } else {
        record.title.clone()
    };

    ResolvedIdentity {
        media_type,
        canonical_title,
        original_title: record.original_title,
        year: markers.year.or(record.year),
        season: markers.season,
        episode: markers.episode,
        imdb_id: record.imdb_id.filter(|id| !id.is_empty()),
        tmdb_id: record.tmdb_id.filter(|id| !id.is_empty()),
    }
}

fn chinese_title(record: &MetadataRecord) -> Option<String> {
    std::iter::once(Some(&record.title))
        .chain(std::iter::once(record.original_title.as_ref()))
        .flatten()
        .find(|t| contains_chinese(t))
        .cloned()
}
