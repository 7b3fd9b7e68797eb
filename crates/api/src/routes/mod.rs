//! API routes.

pub mod control;
pub mod health;
pub mod stream;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/start", post(control::start_handler))
        .route("/pause", post(control::pause_handler))
        .route("/status", get(control::status_handler))
        .route("/clear", post(control::clear_handler))
        .route("/export/csv", get(control::export_csv_handler))
        .route("/ws", get(stream::ws_handler))
        .route("/health", get(health::health_handler))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
