use serde::{Deserialize, Serialize};

/// Why a candidate was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// Both sides carry the same IMDB id.
    IdExact,
    /// The id cache maps the candidate title to the query's TMDB id.
    CacheHit,
    /// A fresh lookup of the candidate text gave the query's TMDB id.
    ReResolvedExact,
    /// Titles contain each other and year/season/episode agree.
    TitleContainment,
    TypeMismatch,
    TitleMismatch,
    YearMismatch,
    SeasonMismatch,
    EpisodeMismatch,
    /// The candidate could not be resolved to a known media type.
    UnresolvedCandidate,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdExact => "id_exact",
            Self::CacheHit => "cache_hit",
            Self::ReResolvedExact => "re_resolved_exact",
            Self::TitleContainment => "title_containment",
            Self::TypeMismatch => "type_mismatch",
            Self::TitleMismatch => "title_mismatch",
            Self::YearMismatch => "year_mismatch",
            Self::SeasonMismatch => "season_mismatch",
            Self::EpisodeMismatch => "episode_mismatch",
            Self::UnresolvedCandidate => "unresolved_candidate",
        }
    }
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing one candidate against the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDecision {
    pub is_match: bool,
    pub reason: MatchReason,
}

impl MatchDecision {
    pub fn matched(reason: MatchReason) -> Self {
        Self {
            is_match: true,
            reason,
        }
    }

    pub fn rejected(reason: MatchReason) -> Self {
        Self {
            is_match: false,
            reason,
        }
    }
}
