//! Standardized API responses.

use newswire_core::PipelineStatus;
use serde::{Deserialize, Serialize};

/// Response to start/pause control calls.
#[derive(Debug, Serialize, Deserialize)]
pub struct ControlResponse {
    pub status: String,
}

impl ControlResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Acknowledgement carrying a human-readable message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Current pipeline status.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: PipelineStatus,
    /// Records in the result log for the current run.
    pub processed: usize,
    /// Currently connected live subscribers.
    pub subscribers: usize,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub pipeline: PipelineStatus,
    pub processed: usize,
    pub subscribers: usize,
    pub queue_depth: u64,
}
