use serde::{Deserialize, Serialize};

use crate::filter::FilterOutcome;
use crate::history::HistoryRecord;
use crate::media::{MediaQuery, MediaType};

/// An entry from an upstream hot list (Douban, Bangumi, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Prefixed upstream id such as `DB:1292052`.
    #[serde(default)]
    pub id: String,
    /// Bare upstream id, preferred over `id` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orgid: Option<String>,
    #[serde(default)]
    pub title: String,
    /// Type code such as `MOV` or `TV`.
    #[serde(default, rename = "type")]
    pub type_code: String,
    /// Human readable type label such as `电影`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

impl ContentItem {
    /// History key: `orgid`, else `id` without its source prefix.
    pub fn key(&self) -> Option<String> {
        if let Some(orgid) = self.orgid.as_deref().map(str::trim) {
            if !orgid.is_empty() {
                return Some(orgid.to_string());
            }
        }
        let id = self.id.trim();
        let bare = id.split_once(':').map(|(_, rest)| rest).unwrap_or(id).trim();
        if bare.is_empty() {
            None
        } else {
            Some(bare.to_string())
        }
    }

    pub fn resolved_media_type(&self) -> MediaType {
        match MediaType::from_code(&self.type_code) {
            MediaType::Unknown => self
                .media_type
                .as_deref()
                .map(MediaType::from_code)
                .unwrap_or_default(),
            known => known,
        }
    }

    /// Build the filter query for this item.
    pub fn to_query(&self) -> MediaQuery {
        MediaQuery {
            title: self.title.trim().to_string(),
            media_type: self.resolved_media_type(),
            year: self.year.as_deref().and_then(|y| y.trim().parse().ok()),
            season: self.season,
            episode: self.episode,
            imdb_id: None,
            tmdb_id: None,
            subtitle_hint: self.overview.clone().filter(|o| !o.trim().is_empty()),
        }
    }
}

/// Result of acquiring one upstream item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum AcquireOutcome {
    /// The item has no title or key.
    Skipped,
    /// History already holds settled links for this item.
    AlreadyKnown(HistoryRecord),
    /// Nothing matched.
    NotFound,
    Found(FilterOutcome),
}

impl AcquireOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::AlreadyKnown(_) => "already_known",
            Self::NotFound => "not_found",
            Self::Found(_) => "found",
        }
    }
}
