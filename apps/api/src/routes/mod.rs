pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/match/batch", post(handlers::handle_match_batch))
        // Parse previews
        .route("/api/v1/parse/resume", post(handlers::handle_parse_resume))
        .route("/api/v1/parse/job", post(handlers::handle_parse_job))
        // Standalone ATS audit
        .route("/api/v1/ats", post(handlers::handle_ats_check))
        .with_state(state)
}
