//! Messages fanned out to live subscribers.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::article::AnalyzedArticle;

/// Pipeline run state. Exactly one instance process-wide, mutated only by
/// the controller under mutual exclusion.
///
/// `Stopped` serializes as `"paused"` to match the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Running,
    #[serde(rename = "paused")]
    Stopped,
}

impl PipelineStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Wire representation (`running` / `paused`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "paused",
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message on the live feed surface.
///
/// Serialized untagged: status changes go out as `{"status": "running"}`,
/// records as the flat [`AnalyzedArticle`] object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StreamMessage {
    Status { status: PipelineStatus },
    Record(Arc<AnalyzedArticle>),
}

impl StreamMessage {
    pub fn status(status: PipelineStatus) -> Self {
        Self::Status { status }
    }

    pub fn record(record: Arc<AnalyzedArticle>) -> Self {
        Self::Record(record)
    }
}
