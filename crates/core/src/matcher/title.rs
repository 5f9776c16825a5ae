//! Title-only comparison rules.

use super::{MatchDecision, MatchReason};
use crate::media::{MediaType, ResolvedIdentity};

/// Compare two identities on title and markers alone.
///
/// Checks, in order: media type equal, canonical titles contain each other
/// (case-insensitive), year equal, and for TV season then episode equal.
/// A marker missing on either side never causes a mismatch.
pub fn match_title_only(query: &ResolvedIdentity, candidate: &ResolvedIdentity) -> MatchDecision {
    if candidate.media_type != query.media_type {
        return MatchDecision::rejected(MatchReason::TypeMismatch);
    }

    if !titles_overlap(&query.canonical_title, &candidate.canonical_title) {
        return MatchDecision::rejected(MatchReason::TitleMismatch);
    }

    if conflicts(query.year, candidate.year) {
        return MatchDecision::rejected(MatchReason::YearMismatch);
    }

    if query.media_type == MediaType::Tv {
        if conflicts(query.season, candidate.season) {
            return MatchDecision::rejected(MatchReason::SeasonMismatch);
        }
        if conflicts(query.episode, candidate.episode) {
            return MatchDecision::rejected(MatchReason::EpisodeMismatch);
        }
    }

    MatchDecision::matched(MatchReason::TitleContainment)
}

/// Permissive check used when the strict pass finds nothing.
///
/// True when the query title and the candidate title contain each other in
/// either direction, or when non-empty `content` and the query title do.
/// Comparison is case-insensitive on the raw strings.
pub fn title_contained(query_title: &str, title: &str, content: &str) -> bool {
    if titles_overlap(query_title, title) {
        return true;
    }
    !content.trim().is_empty() && titles_overlap(query_title, content)
}

/// Case-insensitive containment in either direction. Empty strings never overlap.
fn titles_overlap(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

fn conflicts(a: Option<u32>, b: Option<u32>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a != b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(media_type: MediaType, title: &str) -> ResolvedIdentity {
        ResolvedIdentity {
            media_type,
            canonical_title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_containment_either_direction() {
        let query = identity(MediaType::Movie, "流浪地球");
        let longer = identity(MediaType::Movie, "流浪地球 导演剪辑版");
        assert!(match_title_only(&query, &longer).is_match);
        assert!(match_title_only(&longer, &query).is_match);
    }

    #[test]
    fn test_case_insensitive() {
        let query = identity(MediaType::Tv, "Breaking Bad");
        let candidate = identity(MediaType::Tv, "breaking bad");
        assert_eq!(
            match_title_only(&query, &candidate),
            MatchDecision::matched(MatchReason::TitleContainment)
        );
    }

    #[test]
    fn test_type_mismatch() {
        let query = identity(MediaType::Movie, "三体");
        let candidate = identity(MediaType::Tv, "三体");
        assert_eq!(
            match_title_only(&query, &candidate).reason,
            MatchReason::TypeMismatch
        );
    }

    #[test]
    fn test_title_mismatch() {
        let query = identity(MediaType::Movie, "流浪地球");
        let candidate = identity(MediaType::Movie, "满江红");
        assert_eq!(
            match_title_only(&query, &candidate).reason,
            MatchReason::TitleMismatch
        );
    }

    #[test]
    fn test_year_mismatch() {
        let mut query = identity(MediaType::Movie, "沙丘");
        query.year = Some(2021);
        let mut candidate = identity(MediaType::Movie, "沙丘");
        candidate.year = Some(1984);
        assert_eq!(
            match_title_only(&query, &candidate).reason,
            MatchReason::YearMismatch
        );
    }

    #[test]
    fn test_season_mismatch() {
        let mut query = identity(MediaType::Tv, "Show A");
        query.season = Some(2);
        let mut candidate = identity(MediaType::Tv, "Show A");
        candidate.season = Some(3);

        let decision = match_title_only(&query, &candidate);
        assert!(!decision.is_match);
        assert_eq!(decision.reason, MatchReason::SeasonMismatch);
    }

    #[test]
    fn test_episode_mismatch() {
        let mut query = identity(MediaType::Tv, "Show A");
        query.season = Some(1);
        query.episode = Some(5);
        let mut candidate = identity(MediaType::Tv, "Show A");
        candidate.season = Some(1);
        candidate.episode = Some(6);
        assert_eq!(
            match_title_only(&query, &candidate).reason,
            MatchReason::EpisodeMismatch
        );
    }

    #[test]
    fn test_absent_markers_are_tolerated() {
        let mut query = identity(MediaType::Tv, "Show A");
        query.season = Some(2);
        query.year = Some(2020);
        let candidate = identity(MediaType::Tv, "Show A");

        assert!(match_title_only(&query, &candidate).is_match);
    }

    #[test]
    fn test_movies_ignore_season_markers() {
        let mut query = identity(MediaType::Movie, "Film");
        query.season = Some(1);
        let mut candidate = identity(MediaType::Movie, "Film");
        candidate.season = Some(2);
        assert!(match_title_only(&query, &candidate).is_match);
    }

    #[test]
    fn test_empty_titles_never_match() {
        let query = identity(MediaType::Movie, "");
        let candidate = identity(MediaType::Movie, "Anything");
        assert_eq!(
            match_title_only(&query, &candidate).reason,
            MatchReason::TitleMismatch
        );
    }

    #[test]
    fn test_title_contained() {
        assert!(title_contained("流浪地球", "【4K】流浪地球2 (2023)", ""));
        assert!(title_contained("The Wandering Earth", "wandering earth", ""));
        assert!(title_contained("流浪地球", "某科幻大片", "简介：流浪地球续作"));
        assert!(!title_contained("流浪地球", "满江红", ""));
        assert!(!title_contained("流浪地球", "满江红", "   "));
        assert!(!title_contained("", "满江红", "内容"));
    }
}
