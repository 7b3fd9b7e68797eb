//! Ordered, unbounded hand-off between the producer and the worker pool.

use newswire_core::NewsArticle;
use telemetry::metrics;
use tokio::sync::mpsc;
use tokio::sync::Mutex;

/// Work queue delivering each enqueued article to exactly one worker.
///
/// A single mpsc receiver shared behind an async mutex: the guard is held
/// only across `recv`, so workers block on receipt but process concurrently.
#[derive(Debug)]
pub struct ArticleQueue {
    tx: mpsc::UnboundedSender<NewsArticle>,
    rx: Mutex<mpsc::UnboundedReceiver<NewsArticle>>,
}

impl Default for ArticleQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Enqueues one article. Returns `false` only if the queue is closed,
    /// which cannot happen while the queue itself is alive.
    pub fn push(&self, article: NewsArticle) -> bool {
        let ok = self.tx.send(article).is_ok();
        if ok {
            metrics().queue_depth.inc();
        }
        ok
    }

    /// Receives the next article. Cancel-safe: dropping the future releases
    /// the receiver without losing an item.
    pub async fn recv(&self) -> Option<NewsArticle> {
        let article = self.rx.lock().await.recv().await;
        if article.is_some() {
            metrics().queue_depth.dec();
        }
        article
    }

    /// Discards everything currently queued. Invoked at run start to guard
    /// against stale items surviving a rapid pause/start cycle.
    pub async fn drain(&self) -> usize {
        let mut rx = self.rx.lock().await;
        let mut drained = 0;
        while rx.try_recv().is_ok() {
            drained += 1;
        }
        metrics().queue_depth.set(0);
        drained
    }
}
