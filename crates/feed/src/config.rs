//! Feed configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the news feed collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed language (`hl` parameter).
    #[serde(default = "default_language")]
    pub language: String,
    /// Feed country (`gl` parameter).
    #[serde(default = "default_country")]
    pub country: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Seconds between fetch cycles.
    #[serde(default = "default_fetch_interval_secs")]
    pub fetch_interval_secs: u64,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_country() -> String {
    "US".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_fetch_interval_secs() -> u64 {
    60
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            country: default_country(),
            timeout_secs: default_timeout_secs(),
            fetch_interval_secs: default_fetch_interval_secs(),
        }
    }
}
