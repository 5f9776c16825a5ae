//! Keyword search API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use cloudsaver_core::RawResult;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::handlers::{ApiError, ErrorResponse};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub keyword: String,
    pub source: String,
    /// One entry per kept link.
    pub results: Vec<RawResult>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchStatusResponse {
    pub backend: String,
    pub configured: bool,
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/search?keyword=
///
/// Search the backend and keep links for enabled cloud types, deduplicated.
/// No identity matching is applied.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let source = state.source().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        ErrorResponse::new("Search backend not configured"),
    ))?;

    let keyword = params.keyword.trim();
    if keyword.is_empty() {
        return Err((StatusCode::BAD_REQUEST, ErrorResponse::new("keyword is required")));
    }

    let raw = source.search(keyword).await.map_err(|e| {
        warn!(keyword = keyword, error = %e, "Keyword search failed");
        (StatusCode::BAD_GATEWAY, ErrorResponse::new(e.to_string()))
    })?;
    let results = state.filter().filter_resources(raw);

    Ok(Json(SearchResponse {
        keyword: keyword.to_string(),
        source: source.name().to_string(),
        total: results.len(),
        results,
    }))
}

/// GET /api/v1/search/status
///
/// Report whether a search backend is configured and reachable.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<SearchStatusResponse> {
    let Some(source) = state.source() else {
        return Json(SearchStatusResponse {
            backend: "none".to_string(),
            configured: false,
            connected: false,
            error: None,
        });
    };

    let result = source.check_connection().await;
    if let Err(e) = &result {
        warn!(backend = source.name(), error = %e, "Search backend connection check failed");
    }

    Json(SearchStatusResponse {
        backend: source.name().to_string(),
        configured: true,
        connected: result.is_ok(),
        error: result.err().map(|e| e.to_string()),
    })
}
