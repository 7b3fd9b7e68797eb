//! The ingestion-to-broadcast pipeline.
//!
//! A bounded producer/consumer job system: one producer polls the feed on a
//! timer and enqueues de-duplicated articles, N workers drain the queue and
//! run each article through the enrichment collaborator, and every enriched
//! record is appended to the in-memory result log and fanned out to live
//! subscribers. The [`PipelineController`] owns the run/pause state machine
//! and is the only component that starts or stops background tasks.

pub mod broadcast;
pub mod config;
pub mod controller;
pub mod ledger;
pub mod producer;
pub mod queue;
pub mod results;
pub mod worker;

pub use broadcast::{Broadcaster, SubscriberId};
pub use config::PipelineConfig;
pub use controller::{ControlOutcome, PipelineController};
pub use ledger::SeenLedger;
pub use queue::ArticleQueue;
pub use results::ResultLog;
