//! Filter API handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use cloudsaver_core::{FilterOutcome, MediaQuery, RawResult};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub query: MediaQuery,
    #[serde(default)]
    pub results: Vec<RawResult>,
}

/// POST /api/v1/filter
///
/// Filter raw search results against a media query. Never fails once the
/// body parses; per-item problems show up in the outcome counts.
pub async fn filter_candidates(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FilterRequest>,
) -> Json<FilterOutcome> {
    let outcome = state
        .filter()
        .filter_candidates(&body.query, body.results)
        .await;
    Json(outcome)
}
