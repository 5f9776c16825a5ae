//! Candidate matching against a resolved query identity.
//!
//! [`CandidateMatcher::match_strict`] applies the identity tiers in order:
//!
//! 1. unresolved candidate: reject
//! 2. media type differs: reject
//! 3. same IMDB id: accept
//! 4. id cache maps the candidate title to the query's TMDB id: accept
//! 5. re-resolve the candidate text and compare TMDB ids, or fall back to
//!    [`match_title_only`] when either side has none
//!
//! [`title_contained`] is the permissive check used by the fallback pass.

mod title;
mod types;

pub use title::{match_title_only, title_contained};
pub use types::{MatchDecision, MatchReason};

use std::sync::Arc;

use tracing::debug;

use crate::media::ResolvedIdentity;
use crate::resolver::{IdentityResolver, ResolveError, ResolveRequest};

/// Raw text a candidate identity was resolved from.
#[derive(Debug, Clone, Copy)]
pub struct CandidateText<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// Decides whether resolved candidates refer to the queried media.
pub struct CandidateMatcher {
    resolver: Arc<IdentityResolver>,
}

impl CandidateMatcher {
    pub fn new(resolver: Arc<IdentityResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Arc<IdentityResolver> {
        &self.resolver
    }

    /// Run the strict tiers. Only a failing re-resolve lookup is an error.
    pub async fn match_strict(
        &self,
        query: &ResolvedIdentity,
        candidate: &ResolvedIdentity,
        raw: CandidateText<'_>,
    ) -> Result<MatchDecision, ResolveError> {
        if !candidate.is_resolved() {
            return Ok(MatchDecision::rejected(MatchReason::UnresolvedCandidate));
        }

        if candidate.media_type != query.media_type {
            return Ok(MatchDecision::rejected(MatchReason::TypeMismatch));
        }

        if let (Some(q), Some(c)) = (&query.imdb_id, &candidate.imdb_id) {
            if !q.is_empty() && q == c {
                return Ok(MatchDecision::matched(MatchReason::IdExact));
            }
        }

        if let Some(query_tmdb) = &query.tmdb_id {
            if self.resolver.cached_id(&candidate.canonical_title).as_ref() == Some(query_tmdb) {
                return Ok(MatchDecision::matched(MatchReason::CacheHit));
            }
        }

        let request = ResolveRequest::new(raw.title)
            .with_subtitle(raw.content)
            .with_type_hint(query.media_type)
            .prefer_chinese_title(false);
        let re_resolved = self.resolver.resolve(&request).await?;

        if !re_resolved.is_resolved() {
            return Ok(MatchDecision::rejected(MatchReason::UnresolvedCandidate));
        }

        let decision = match (&query.tmdb_id, &re_resolved.tmdb_id) {
            (Some(q), Some(c)) if q == c => MatchDecision::matched(MatchReason::ReResolvedExact),
            (Some(_), Some(_)) => MatchDecision::rejected(MatchReason::TitleMismatch),
            _ => match_title_only(query, &re_resolved),
        };

        debug!(
            "Re-resolved '{}' as '{}' (tmdb={:?}): {}",
            raw.title, re_resolved.canonical_title, re_resolved.tmdb_id, decision.reason
        );

        Ok(decision)
    }
}
