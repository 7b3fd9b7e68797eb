//! Application state shared across handlers.

use std::sync::Arc;

use pipeline::PipelineController;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The pipeline controller; the only path to start/stop background work.
    pub controller: Arc<PipelineController>,
}

impl AppState {
    pub fn new(controller: Arc<PipelineController>) -> Self {
        Self { controller }
    }
}
