//! Health check endpoint.

use axum::{extract::State, Json};
use telemetry::metrics;

use crate::response::HealthResponse;
use crate::state::AppState;

/// GET /health - Process health and pipeline gauges.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        pipeline: state.controller.status(),
        processed: state.controller.results().len(),
        subscribers: state.controller.broadcaster().subscriber_count(),
        queue_depth: metrics().queue_depth.get(),
    })
}
