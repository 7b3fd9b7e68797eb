//! Internal telemetry for the newswire engine.
//!
//! Structured logging via tracing, plus a small in-memory metrics registry
//! exposed through the status and health endpoints.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::*;
pub use tracing_setup::*;
