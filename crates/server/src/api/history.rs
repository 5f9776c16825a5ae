//! History API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cloudsaver_core::{HistoryError, HistoryRecord};
use serde::Serialize;

use super::handlers::{ApiError, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub records: Vec<HistoryRecord>,
    pub total: usize,
}

fn history_error(error: HistoryError) -> ApiError {
    let status = match error {
        HistoryError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, ErrorResponse::new(error.to_string()))
}

/// GET /api/v1/history
///
/// List history records, newest first.
pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HistoryListResponse>, ApiError> {
    let records = state.history().list().map_err(history_error)?;
    let total = records.len();
    Ok(Json(HistoryListResponse { records, total }))
}

/// GET /api/v1/history/{key}
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<HistoryRecord>, ApiError> {
    match state.history().get(&key) {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(history_error(HistoryError::NotFound(key))),
        Err(e) => Err(history_error(e)),
    }
}

/// DELETE /api/v1/history/{key}
///
/// Forget an item so the next acquisition searches again.
pub async fn delete_history(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .history()
        .delete(&key)
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(history_error)
}
