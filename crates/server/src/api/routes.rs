use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{acquire, filter, handlers, history, middleware::metrics_middleware, search};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Filtering
        .route("/filter", post(filter::filter_candidates))
        // Keyword search (requires a search backend)
        .route("/search", get(search::search))
        .route("/search/status", get(search::get_status))
        // Acquisition (requires a search backend)
        .route("/acquire", post(acquire::acquire))
        .route("/acquire/batch", post(acquire::acquire_batch))
        // History
        .route("/history", get(history::list_history))
        .route("/history/{key}", get(history::get_history))
        .route("/history/{key}", delete(history::delete_history))
        .with_state(state);

    Router::new()
        .route("/metrics", get(handlers::metrics))
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
