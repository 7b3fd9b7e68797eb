//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the pipeline controller and its workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Topic tracked when a start request does not name one.
    #[serde(default = "default_topic")]
    pub default_topic: String,
    /// Worker count when a start request does not name one.
    #[serde(default = "default_agents")]
    pub default_agents: usize,
    /// Worker count under power mode.
    #[serde(default = "default_power_agents")]
    pub power_agents: usize,
    /// Pause after an unexpected worker-loop failure.
    #[serde(default = "default_worker_cooldown_secs")]
    pub worker_cooldown_secs: u64,
    /// Bounded wait for a generation to quiesce on pause; tasks still
    /// running past it are aborted.
    #[serde(default = "default_quiesce_timeout_secs")]
    pub quiesce_timeout_secs: u64,
}

fn default_topic() -> String {
    "Technology".to_string()
}

fn default_agents() -> usize {
    1
}

fn default_power_agents() -> usize {
    5
}

fn default_worker_cooldown_secs() -> u64 {
    30
}

fn default_quiesce_timeout_secs() -> u64 {
    5
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_topic: default_topic(),
            default_agents: default_agents(),
            power_agents: default_power_agents(),
            worker_cooldown_secs: default_worker_cooldown_secs(),
            quiesce_timeout_secs: default_quiesce_timeout_secs(),
        }
    }
}
