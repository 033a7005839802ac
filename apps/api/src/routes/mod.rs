pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::assessment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/assess-cv", post(handlers::handle_assess_cv))
        .route("/api/v1/assess", post(handlers::handle_assess_cv))
        .route("/api/v1/criteria", get(handlers::handle_list_criteria))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
