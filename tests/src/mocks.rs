//! Mock implementations for testing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use analysis::{AnalysisOutcome, Analyzer};
use async_trait::async_trait;
use feed::NewsFeed;
use newswire_core::{Error, NewsAnalysis, NewsArticle, Result, Sentiment};
use parking_lot::Mutex;

/// Mock feed returning a scripted article list on every fetch.
///
/// Implements the same `NewsFeed` trait as `GoogleNewsFeed`, so tests
/// exercise all production paths except the RSS network transport. The same
/// batch is returned on every cycle, which is exactly what a real feed does
/// within its publication window — de-duplication has to cope with it.
#[derive(Clone, Default)]
pub struct MockFeed {
    articles: Arc<Mutex<Vec<NewsArticle>>>,
    should_fail: Arc<Mutex<bool>>,
    fetch_count: Arc<AtomicU64>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_articles(&self, articles: Vec<NewsArticle>) {
        *self.articles.lock() = articles;
    }

    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl NewsFeed for MockFeed {
    async fn fetch(&self, _topic: &str) -> Result<Vec<NewsArticle>> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.lock() {
            return Err(Error::feed("mock feed failure"));
        }
        Ok(self.articles.lock().clone())
    }
}

/// Mock analyzer succeeding or failing per article content.
///
/// Fails for any content containing a configured marker; otherwise returns
/// a bullish analysis echoing the content.
#[derive(Clone, Default)]
pub struct MockAnalyzer {
    fail_markers: Arc<Mutex<Vec<String>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    call_count: Arc<AtomicU64>,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any content containing `marker` will fail analysis.
    pub fn fail_on(&self, marker: impl Into<String>) {
        self.fail_markers.lock().push(marker.into());
    }

    /// Simulate a slow enrichment call.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, content: &str) -> Result<AnalysisOutcome> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let markers = self.fail_markers.lock().clone();
        if markers.iter().any(|m| content.contains(m.as_str())) {
            return Err(Error::analysis("mock analysis failure"));
        }

        let mut analysis = NewsAnalysis::fallback("unused");
        analysis.sentiment = Sentiment::Bullish;
        analysis.confidence = 0.75;
        analysis.risks.clear();
        analysis.summary_explanation = format!("Mock analysis of: {content}");

        Ok(AnalysisOutcome {
            analysis,
            completion_tokens: Some(128),
            api_time: Duration::from_millis(64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_feed_scripting() {
        let feed = MockFeed::new();
        feed.set_articles(vec![crate::fixtures::article("x")]);
        assert_eq!(feed.fetch("Tech").await.unwrap().len(), 1);

        feed.set_should_fail(true);
        assert!(feed.fetch("Tech").await.is_err());
        assert_eq!(feed.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_analyzer_fail_marker() {
        let analyzer = MockAnalyzer::new();
        analyzer.fail_on("bad");
        assert!(analyzer.analyze("a bad article").await.is_err());

        let outcome = analyzer.analyze("a fine article").await.unwrap();
        assert_eq!(outcome.analysis.sentiment, Sentiment::Bullish);
        assert_eq!(outcome.tokens_per_second(), Some(2000.0));
    }
}
