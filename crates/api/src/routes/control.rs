//! Pipeline control surface: start, pause, status, clear, export.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::export::to_csv;
use crate::response::{ControlResponse, MessageResponse, StatusResponse};
use crate::state::AppState;

/// Query parameters for `POST /start`.
#[derive(Debug, Deserialize)]
pub struct StartParams {
    /// News topic to track.
    pub topic: Option<String>,
    /// Explicit worker count; takes precedence over `power`.
    pub agents: Option<usize>,
    /// Power mode: run with the configured parallel agent count.
    pub power_mode: Option<bool>,
}

/// POST /start - Starts the pipeline for a topic. Idempotent.
pub async fn start_handler(
    State(state): State<AppState>,
    Query(params): Query<StartParams>,
) -> Json<ControlResponse> {
    let config = state.controller.config();
    let topic = params
        .topic
        .unwrap_or_else(|| config.default_topic.clone());
    let agents = params.agents.unwrap_or(if params.power_mode.unwrap_or(false) {
        config.power_agents
    } else {
        config.default_agents
    });

    let outcome = state.controller.start(&topic, agents).await;
    Json(ControlResponse::new(outcome.message()))
}

/// POST /pause - Stops the current generation. Idempotent.
pub async fn pause_handler(State(state): State<AppState>) -> Json<ControlResponse> {
    let outcome = state.controller.pause().await;
    Json(ControlResponse::new(outcome.message()))
}

/// GET /status - Current pipeline status.
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: state.controller.status(),
        processed: state.controller.results().len(),
        subscribers: state.controller.broadcaster().subscriber_count(),
    })
}

/// POST /clear - Clears the result log.
pub async fn clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.controller.results().clear();
    info!("Cleared all analysis results");
    Json(MessageResponse::new("Analyzed articles cleared successfully."))
}

/// GET /export/csv - The result log as a CSV attachment.
pub async fn export_csv_handler(State(state): State<AppState>) -> Response {
    let records = state.controller.results().snapshot();
    if records.is_empty() {
        return Json(MessageResponse::new("No data to export.")).into_response();
    }

    let filename = format!(
        "news_analysis_{}.csv",
        chrono::Utc::now().format("%Y%m%d-%H%M%S")
    );
    let body = to_csv(&records);

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        body,
    )
        .into_response()
}
