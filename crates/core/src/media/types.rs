use serde::{Deserialize, Serialize};

/// Kind of media a title refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    #[serde(alias = "MOV", alias = "电影")]
    Movie,
    #[serde(alias = "TV", alias = "电视剧")]
    Tv,
    #[default]
    Unknown,
}

impl MediaType {
    /// Parse the type codes used by upstream content feeds.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "MOV" | "电影" => Self::Movie,
            c if c.eq_ignore_ascii_case("movie") => Self::Movie,
            "TV" | "电视剧" => Self::Tv,
            c if c.eq_ignore_ascii_case("tv") => Self::Tv,
            _ => Self::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller is looking for.
///
/// Only `title` is required. Explicit year/season/episode values take
/// precedence over anything parsed out of the title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaQuery {
    pub title: String,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<String>,
    /// Extra descriptive text (overview, alternate title) used as a
    /// secondary source of year/season/episode markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_hint: Option<String>,
}

impl MediaQuery {
    pub fn new(title: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            title: title.into(),
            media_type,
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_season(mut self, season: u32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_episode(mut self, episode: u32) -> Self {
        self.episode = Some(episode);
        self
    }

    pub fn with_tmdb_id(mut self, tmdb_id: impl Into<String>) -> Self {
        self.tmdb_id = Some(tmdb_id.into());
        self
    }

    pub fn with_imdb_id(mut self, imdb_id: impl Into<String>) -> Self {
        self.imdb_id = Some(imdb_id.into());
        self
    }

    pub fn with_subtitle_hint(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle_hint = Some(subtitle.into());
        self
    }
}

/// Canonical identity of a title after metadata resolution.
///
/// An identity with `media_type == Unknown` is unresolved; its other fields
/// hold whatever could be parsed from the text alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIdentity {
    pub media_type: MediaType,
    pub canonical_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<String>,
}

impl ResolvedIdentity {
    /// An identity for text that could not be resolved.
    pub fn unresolved(title: impl Into<String>) -> Self {
        Self {
            canonical_title: title.into(),
            ..Default::default()
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.media_type.is_known()
    }

    pub fn has_external_id(&self) -> bool {
        self.imdb_id.is_some() || self.tmdb_id.is_some()
    }
}
