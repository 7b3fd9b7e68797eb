//! Article types flowing through the pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::NewsAnalysis;

/// A raw news item retrieved from the external feed, not yet analyzed.
///
/// The `link` is the stable identity used for de-duplication within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub link: String,
    pub title: String,
    pub summary: String,
    /// Publication timestamp as reported by the feed (RFC 2822 text).
    pub published: String,
}

/// A [`NewsArticle`] combined with its analysis and timing metadata.
///
/// Created exactly once per processed article, immutable after creation.
/// Owned by the result log; broadcast as `Arc<AnalyzedArticle>` so
/// subscribers share one copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedArticle {
    /// Unique task identifier, `task_<uuid>`.
    pub task_id: String,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
    pub analysis: NewsAnalysis,
    /// Wall-clock processing duration in seconds.
    pub processing_time: f64,
    /// Inference throughput, when the collaborator reports usage data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_per_second: Option<f64>,
}

impl AnalyzedArticle {
    /// Builds a record from an article and its analysis outcome.
    pub fn new(
        article: NewsArticle,
        analysis: NewsAnalysis,
        processing_time: f64,
        tokens_per_second: Option<f64>,
    ) -> Self {
        Self {
            task_id: format!("task_{}", Uuid::new_v4()),
            title: article.title,
            link: article.link,
            summary: article.summary,
            published: article.published,
            analysis,
            processing_time,
            tokens_per_second,
        }
    }
}
