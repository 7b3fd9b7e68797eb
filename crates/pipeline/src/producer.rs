//! Producer task: polls the feed on a timer and enqueues new articles.

use std::sync::Arc;
use std::time::Duration;

use feed::NewsFeed;
use telemetry::metrics;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::ledger::SeenLedger;
use crate::queue::ArticleQueue;

/// Polls the feed collaborator for one topic and feeds the work queue.
///
/// One producer per generation. Fetch failures are logged and treated as an
/// empty cycle; the stop signal is observed within one fetch-or-sleep cycle.
pub struct Producer {
    feed: Arc<dyn NewsFeed>,
    queue: Arc<ArticleQueue>,
    ledger: Arc<SeenLedger>,
    fetch_interval: Duration,
}

impl Producer {
    pub fn new(
        feed: Arc<dyn NewsFeed>,
        queue: Arc<ArticleQueue>,
        ledger: Arc<SeenLedger>,
        fetch_interval: Duration,
    ) -> Self {
        Self {
            feed,
            queue,
            ledger,
            fetch_interval,
        }
    }

    pub async fn run(self, topic: String, mut shutdown: watch::Receiver<bool>) {
        info!(topic = %topic, "Producer started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            let articles = tokio::select! {
                result = self.feed.fetch(&topic) => match result {
                    Ok(articles) => articles,
                    Err(e) => {
                        warn!(topic = %topic, error = %e, "Feed fetch failed, skipping cycle");
                        metrics().feed_errors.inc();
                        Vec::new()
                    }
                },
                _ = shutdown.changed() => break,
            };

            // Re-check before enqueueing: a pause during the fetch must not
            // push further items.
            if *shutdown.borrow() {
                break;
            }

            metrics().articles_fetched.inc_by(articles.len() as u64);
            let mut enqueued = 0usize;
            for article in articles {
                if self.ledger.insert_if_unseen(&article.link) {
                    if self.queue.push(article) {
                        enqueued += 1;
                    }
                } else {
                    metrics().duplicates_skipped.inc();
                }
            }
            metrics().articles_enqueued.inc_by(enqueued as u64);
            if enqueued > 0 {
                info!(topic = %topic, enqueued = enqueued, "Enqueued new articles");
            }

            tokio::select! {
                _ = tokio::time::sleep(self.fetch_interval) => {}
                _ = shutdown.changed() => break,
            }
        }

        info!(topic = %topic, "Producer stopped");
    }
}
