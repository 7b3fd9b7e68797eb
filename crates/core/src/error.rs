//! Unified error types for the newswire engine.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the newswire engine.
///
/// No variant here is fatal to the process: feed errors degrade to an empty
/// fetch cycle, analysis errors degrade to a fallback record, and everything
/// else is reported at the API boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// The feed collaborator failed to fetch or parse articles.
    #[error("feed error: {0}")]
    Feed(String),

    /// The enrichment collaborator failed (HTTP error, timeout, bad payload).
    #[error("analysis error: {0}")]
    Analysis(String),

    /// The enrichment collaborator returned a structurally invalid result.
    #[error("invalid analysis payload: {0}")]
    InvalidAnalysis(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn feed(msg: impl Into<String>) -> Self {
        Self::Feed(msg.into())
    }

    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis(msg.into())
    }

    pub fn invalid_analysis(msg: impl Into<String>) -> Self {
        Self::InvalidAnalysis(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
