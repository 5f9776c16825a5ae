//! Acquisition API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use cloudsaver_core::{AcquireError, AcquireOutcome, Acquirer, ContentItem};
use serde::{Deserialize, Serialize};

use super::handlers::{ApiError, ErrorResponse};
use crate::state::AppState;

fn default_concurrency() -> usize {
    4
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct BatchAcquireRequest {
    pub items: Vec<ContentItem>,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

/// One item of a batch response: the outcome, or the error message.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItemResult {
    Outcome(AcquireOutcome),
    Error { error: String },
}

#[derive(Debug, Serialize)]
pub struct BatchAcquireResponse {
    pub results: Vec<BatchItemResult>,
}

fn require_acquirer(state: &AppState) -> Result<&Acquirer, ApiError> {
    state.acquirer().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        ErrorResponse::new("Search backend not configured"),
    ))
}

fn error_status(error: &AcquireError) -> StatusCode {
    match error {
        AcquireError::Search(_) => StatusCode::BAD_GATEWAY,
        AcquireError::History(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/acquire
///
/// Search, filter and record links for one upstream item.
pub async fn acquire(
    State(state): State<Arc<AppState>>,
    Json(item): Json<ContentItem>,
) -> Result<Json<AcquireOutcome>, ApiError> {
    let acquirer = require_acquirer(&state)?;

    match acquirer.acquire(&item).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => Err((error_status(&e), ErrorResponse::new(e.to_string()))),
    }
}

/// POST /api/v1/acquire/batch
///
/// Acquire a list of items. Per-item failures are reported inline.
pub async fn acquire_batch(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BatchAcquireRequest>,
) -> Result<Json<BatchAcquireResponse>, ApiError> {
    let acquirer = require_acquirer(&state)?;

    let results = acquirer
        .acquire_all(&body.items, body.concurrency)
        .await
        .into_iter()
        .map(|result| match result {
            Ok(outcome) => BatchItemResult::Outcome(outcome),
            Err(e) => BatchItemResult::Error {
                error: e.to_string(),
            },
        })
        .collect();

    Ok(Json(BatchAcquireResponse { results }))
}
