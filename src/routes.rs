use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::{self, AppState};
use crate::openapi;

/// Request size limit: 1MB max payload
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application routes with state applied. `/health` and global layers are added in `main`.
pub fn app_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Interactive form
        .route("/", get(handlers::index))
        .route("/results", get(handlers::results_page))
        // API Documentation
        .route("/docs", get(openapi::serve_swagger_ui))
        .route("/api-docs/openapi.json", get(openapi::serve_openapi_spec))
        // API endpoints
        .route("/api/v1/leads/seed", get(handlers::seed_leads))
        .route("/api/v1/leads/generate", post(handlers::generate))
        .route("/api/v1/leads/export.csv", get(handlers::export_csv))
        .fallback(handlers::not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
