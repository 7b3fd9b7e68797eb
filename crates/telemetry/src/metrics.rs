//! In-memory metrics collection.
//!
//! Lock-free counters and gauges surfaced through the status and health
//! endpoints; no external metrics system.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monotonically increasing counter.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// A gauge metric (can go up or down).
#[derive(Debug, Default)]
pub struct Gauge(AtomicU64);

impl Gauge {
    pub fn set(&self, val: u64) {
        self.0.store(val, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dec(&self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Latency tracker keeping a running sum and count.
#[derive(Debug, Default)]
pub struct LatencyTracker {
    sum_ms: AtomicU64,
    count: AtomicU64,
}

impl LatencyTracker {
    pub fn observe(&self, ms: u64) {
        self.sum_ms.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum_ms.load(Ordering::Relaxed) as f64 / count as f64
        }
    }
}

/// Collected metrics for the newswire engine.
#[derive(Debug, Default)]
pub struct Metrics {
    // Producer metrics
    pub articles_fetched: Counter,
    pub articles_enqueued: Counter,
    pub duplicates_skipped: Counter,
    pub feed_errors: Counter,

    // Worker metrics
    pub articles_analyzed: Counter,
    pub analysis_failures: Counter,
    pub analysis_latency_ms: LatencyTracker,

    // Broadcast metrics
    pub records_broadcast: Counter,
    pub subscriber_send_failures: Counter,

    // Gauges
    pub queue_depth: Gauge,
    pub subscribers_connected: Gauge,
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub articles_fetched: u64,
    pub articles_enqueued: u64,
    pub duplicates_skipped: u64,
    pub feed_errors: u64,
    pub articles_analyzed: u64,
    pub analysis_failures: u64,
    pub analysis_latency_mean_ms: f64,
    pub records_broadcast: u64,
    pub subscriber_send_failures: u64,
    pub queue_depth: u64,
    pub subscribers_connected: u64,
}

impl Metrics {
    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            articles_fetched: self.articles_fetched.get(),
            articles_enqueued: self.articles_enqueued.get(),
            duplicates_skipped: self.duplicates_skipped.get(),
            feed_errors: self.feed_errors.get(),
            articles_analyzed: self.articles_analyzed.get(),
            analysis_failures: self.analysis_failures.get(),
            analysis_latency_mean_ms: self.analysis_latency_ms.mean(),
            records_broadcast: self.records_broadcast.get(),
            subscriber_send_failures: self.subscriber_send_failures.get(),
            queue_depth: self.queue_depth.get(),
            subscribers_connected: self.subscribers_connected.get(),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::default);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
