//! Pipeline controller: the run/pause state machine.
//!
//! The controller is the only component that spawns or destroys background
//! tasks. One `start` creates a generation (one producer + N workers) that
//! the next `pause` destroys entirely; no task outlives its generation.

use std::sync::Arc;
use std::time::Duration;

use analysis::Analyzer;
use feed::NewsFeed;
use newswire_core::{PipelineStatus, StreamMessage};
use parking_lot::RwLock;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::broadcast::Broadcaster;
use crate::config::PipelineConfig;
use crate::ledger::SeenLedger;
use crate::producer::Producer;
use crate::queue::ArticleQueue;
use crate::results::ResultLog;
use crate::worker::Worker;

/// Result of a control operation; misuse (start while running, pause while
/// stopped) is a no-op outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    Started,
    AlreadyRunning,
    Paused,
    NotRunning,
}

impl ControlOutcome {
    /// Wire message for the control surface.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Started => "News feed started",
            Self::AlreadyRunning => "News feed is already running",
            Self::Paused => "paused",
            Self::NotRunning => "not running",
        }
    }
}

/// The tasks spawned by one `start` call, destroyed together on `pause`.
struct Generation {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

/// Owns the pipeline lifecycle and all shared pipeline state.
///
/// State transitions are serialized by the generation mutex; concurrent
/// start/pause calls can never double-spawn or double-cancel a generation.
pub struct PipelineController {
    config: PipelineConfig,
    fetch_interval: Duration,
    feed: Arc<dyn NewsFeed>,
    analyzer: Arc<dyn Analyzer>,
    queue: Arc<ArticleQueue>,
    ledger: Arc<SeenLedger>,
    results: Arc<ResultLog>,
    broadcaster: Arc<Broadcaster>,
    status: RwLock<PipelineStatus>,
    generation: Mutex<Option<Generation>>,
}

impl PipelineController {
    pub fn new(
        config: PipelineConfig,
        fetch_interval: Duration,
        feed: Arc<dyn NewsFeed>,
        analyzer: Arc<dyn Analyzer>,
    ) -> Self {
        Self {
            config,
            fetch_interval,
            feed,
            analyzer,
            queue: Arc::new(ArticleQueue::new()),
            ledger: Arc::new(SeenLedger::new()),
            results: Arc::new(ResultLog::new()),
            broadcaster: Arc::new(Broadcaster::new()),
            status: RwLock::new(PipelineStatus::Stopped),
            generation: Mutex::new(None),
        }
    }

    pub fn status(&self) -> PipelineStatus {
        *self.status.read()
    }

    pub fn results(&self) -> &Arc<ResultLog> {
        &self.results
    }

    pub fn broadcaster(&self) -> &Arc<Broadcaster> {
        &self.broadcaster
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Number of background tasks in the current generation (0 when
    /// stopped, producer + workers when running).
    pub async fn task_count(&self) -> usize {
        self.generation
            .lock()
            .await
            .as_ref()
            .map(|g| g.handles.len())
            .unwrap_or(0)
    }

    /// Starts a new generation for `topic` with `agents` workers.
    ///
    /// Idempotent: a second start without an intervening pause is a no-op.
    pub async fn start(&self, topic: &str, agents: usize) -> ControlOutcome {
        let mut generation = self.generation.lock().await;
        if self.status().is_running() {
            return ControlOutcome::AlreadyRunning;
        }

        *self.status.write() = PipelineStatus::Running;

        // Fresh run: no results, no stale duplicate suppression, and an
        // empty queue before the producer spawns.
        self.results.clear();
        self.ledger.reset();
        let stale = self.queue.drain().await;
        if stale > 0 {
            warn!(discarded = stale, "Discarded stale queued articles from a previous run");
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let agents = agents.max(1);
        let mut handles = Vec::with_capacity(agents + 1);

        let producer = Producer::new(
            self.feed.clone(),
            self.queue.clone(),
            self.ledger.clone(),
            self.fetch_interval,
        );
        handles.push(tokio::spawn(producer.run(topic.to_string(), shutdown_rx.clone())));

        for id in 1..=agents {
            let worker = Worker::new(
                id,
                self.queue.clone(),
                self.analyzer.clone(),
                self.results.clone(),
                self.broadcaster.clone(),
                Duration::from_secs(self.config.worker_cooldown_secs),
            );
            handles.push(tokio::spawn(worker.run(shutdown_rx.clone())));
        }

        *generation = Some(Generation {
            shutdown: shutdown_tx,
            handles,
        });

        // Broadcast strictly after the state flip, still under the
        // transition lock so a racing pause cannot reorder notifications.
        self.broadcaster
            .broadcast(StreamMessage::status(PipelineStatus::Running));
        info!(topic = topic, agents = agents, "Pipeline started");
        ControlOutcome::Started
    }

    /// Signals the current generation to stop and waits (bounded) for it to
    /// quiesce. All task handles are released; a later start spawns an
    /// entirely new generation.
    pub async fn pause(&self) -> ControlOutcome {
        let mut generation_slot = self.generation.lock().await;
        if !self.status().is_running() {
            return ControlOutcome::NotRunning;
        }

        *self.status.write() = PipelineStatus::Stopped;

        if let Some(generation) = generation_slot.take() {
            let _ = generation.shutdown.send(true);
            let quiesce = Duration::from_secs(self.config.quiesce_timeout_secs);

            for mut handle in generation.handles {
                if tokio::time::timeout(quiesce, &mut handle).await.is_err() {
                    warn!("Task did not quiesce within {}s, aborting", quiesce.as_secs());
                    handle.abort();
                }
            }
        }

        self.broadcaster
            .broadcast(StreamMessage::status(PipelineStatus::Stopped));
        info!("Pipeline paused");
        ControlOutcome::Paused
    }
}
