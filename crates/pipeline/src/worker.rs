//! Worker task: drains the queue, enriches, logs, broadcasts.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use analysis::Analyzer;
use futures_util::FutureExt;
use newswire_core::{AnalyzedArticle, NewsAnalysis, NewsArticle, Result, StreamMessage};
use telemetry::metrics;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::broadcast::Broadcaster;
use crate::queue::ArticleQueue;
use crate::results::ResultLog;

/// One member of the worker pool.
///
/// Enrichment failures become fallback records; anything else unexpected in
/// the loop body is caught and followed by a cooldown, so one bad item can
/// never take the worker down.
pub struct Worker {
    id: usize,
    queue: Arc<ArticleQueue>,
    analyzer: Arc<dyn Analyzer>,
    results: Arc<ResultLog>,
    broadcaster: Arc<Broadcaster>,
    cooldown: Duration,
}

impl Worker {
    pub fn new(
        id: usize,
        queue: Arc<ArticleQueue>,
        analyzer: Arc<dyn Analyzer>,
        results: Arc<ResultLog>,
        broadcaster: Arc<Broadcaster>,
        cooldown: Duration,
    ) -> Self {
        Self {
            id,
            queue,
            analyzer,
            results,
            broadcaster,
            cooldown,
        }
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(worker_id = self.id, "Worker started");

        loop {
            let article = tokio::select! {
                _ = shutdown.changed() => break,
                article = self.queue.recv() => match article {
                    Some(article) => article,
                    None => break,
                },
            };

            // The pipeline may have stopped between enqueue and receipt.
            if *shutdown.borrow() {
                debug!(worker_id = self.id, link = %article.link, "Discarding item, pipeline stopped");
                break;
            }

            let outcome = AssertUnwindSafe(self.process(article, &shutdown))
                .catch_unwind()
                .await;

            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(worker_id = self.id, error = %e, "Worker loop error");
                    self.cooldown_pause(&mut shutdown).await;
                }
                Err(_) => {
                    error!(worker_id = self.id, "Worker loop panicked");
                    self.cooldown_pause(&mut shutdown).await;
                }
            }

            if *shutdown.borrow() {
                break;
            }
        }

        info!(worker_id = self.id, "Worker stopped");
    }

    async fn process(&self, article: NewsArticle, shutdown: &watch::Receiver<bool>) -> Result<()> {
        let start = Instant::now();
        info!(worker_id = self.id, title = %article.title, "Processing article");

        let (analysis, tokens_per_second) = match self.analyzer.analyze(&article.summary).await {
            Ok(outcome) => {
                let tps = outcome.tokens_per_second();
                (outcome.analysis, tps)
            }
            Err(e) => {
                warn!(
                    worker_id = self.id,
                    link = %article.link,
                    error = %e,
                    "Analysis failed, substituting fallback record"
                );
                metrics().analysis_failures.inc();
                (NewsAnalysis::fallback(&e.to_string()), None)
            }
        };

        let processing_time = start.elapsed();

        // An analysis that completed after cancellation is discarded, never
        // logged or broadcast: the pipeline has already moved to Stopped.
        if *shutdown.borrow() {
            debug!(worker_id = self.id, link = %article.link, "Discarding in-flight result after stop");
            return Ok(());
        }

        metrics().articles_analyzed.inc();
        metrics()
            .analysis_latency_ms
            .observe(processing_time.as_millis() as u64);

        let title = article.title.clone();
        let record = self.results.append(AnalyzedArticle::new(
            article,
            analysis,
            processing_time.as_secs_f64(),
            tokens_per_second,
        ));
        // Log-then-publish: the append above completes before any
        // subscriber can observe the record.
        self.broadcaster.broadcast(StreamMessage::record(record));
        metrics().records_broadcast.inc();

        info!(
            worker_id = self.id,
            title = %title,
            processing_secs = processing_time.as_secs_f64(),
            "Finished processing article"
        );
        Ok(())
    }

    async fn cooldown_pause(&self, shutdown: &mut watch::Receiver<bool>) {
        tokio::select! {
            _ = tokio::time::sleep(self.cooldown) => {}
            _ = shutdown.changed() => {}
        }
    }
}
