/// Application routes configuration
use crate::handlers::{get_configuration, get_merged, get_state, health, AppState};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Feed endpoints
        .route("/config", get(get_configuration))
        .route("/state", get(get_state))
        .route("/merged", get(get_merged))
        .with_state(state)
}
