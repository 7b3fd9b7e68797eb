//! Google News RSS feed implementation.

use std::time::Duration;

use async_trait::async_trait;
use newswire_core::{Error, NewsArticle, Result};
use tracing::debug;
use url::Url;

use crate::config::FeedConfig;

const GOOGLE_NEWS_RSS: &str = "https://news.google.com/rss/search";

/// External source of candidate articles for a topic.
///
/// May return an empty list and is not assumed reliable; the producer treats
/// any error as an empty cycle.
#[async_trait]
pub trait NewsFeed: Send + Sync {
    async fn fetch(&self, topic: &str) -> Result<Vec<NewsArticle>>;
}

/// Fetches news from the Google News RSS search feed.
pub struct GoogleNewsFeed {
    client: reqwest::Client,
    config: FeedConfig,
}

impl GoogleNewsFeed {
    pub fn new(config: FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::feed(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Builds the RSS search URL for a topic, restricted to the last hour.
    fn feed_url(&self, topic: &str) -> Result<Url> {
        let query = format!("{topic} when:1h");
        Url::parse_with_params(
            GOOGLE_NEWS_RSS,
            &[
                ("q", query.as_str()),
                ("hl", self.config.language.as_str()),
                ("gl", self.config.country.as_str()),
                (
                    "ceid",
                    &format!("{}_{}", self.config.country, self.config.language),
                ),
            ],
        )
        .map_err(|e| Error::feed(format!("invalid feed URL: {e}")))
    }
}

#[async_trait]
impl NewsFeed for GoogleNewsFeed {
    async fn fetch(&self, topic: &str) -> Result<Vec<NewsArticle>> {
        let url = self.feed_url(topic)?;
        debug!(topic = topic, url = %url, "Fetching news feed");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::feed(format!("feed request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::feed(format!(
                "feed returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::feed(format!("failed to read feed body: {e}")))?;

        let articles = parse_rss(&body)?;
        debug!(topic = topic, count = articles.len(), "Feed fetch complete");
        Ok(articles)
    }
}

/// Parses an RSS/Atom document into candidate articles.
///
/// Entries without a link are skipped: the link is the de-duplication
/// identity and a record without one can never be tracked.
pub fn parse_rss(body: &[u8]) -> Result<Vec<NewsArticle>> {
    let parsed = feed_rs::parser::parse(body)
        .map_err(|e| Error::feed(format!("failed to parse RSS feed: {e}")))?;

    let articles = parsed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .filter(|href| !href.is_empty())?;
            let title = entry.title.map(|t| t.content).unwrap_or_default();
            let summary = entry
                .summary
                .map(|t| t.content)
                .unwrap_or_else(|| title.clone());
            let published = entry
                .published
                .map(|d| d.to_rfc2822())
                .unwrap_or_default();

            Some(NewsArticle {
                link,
                title,
                summary,
                published,
            })
        })
        .collect();

    Ok(articles)
}
