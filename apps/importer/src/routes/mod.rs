pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::import::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/profile", get(handlers::handle_get_profile))
        .route("/api/v1/profile/import", post(handlers::handle_import))
        .route(
            "/api/v1/profile/imports",
            get(handlers::handle_import_history),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
