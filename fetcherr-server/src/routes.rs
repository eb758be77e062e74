use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    handlers::{health_handler, interactions::interactions_handler},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/interactions", post(interactions_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
