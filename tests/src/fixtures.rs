//! Test data generators.

use newswire_core::NewsArticle;

/// A feed article with a unique link derived from `id`.
pub fn article(id: &str) -> NewsArticle {
    NewsArticle {
        link: format!("https://news.example.com/{id}"),
        title: format!("Headline {id}"),
        summary: format!("Summary of story {id}"),
        published: "Mon, 25 Aug 2025 12:00:00 +0000".to_string(),
    }
}

/// A batch of `count` distinct articles sharing a prefix.
pub fn articles(prefix: &str, count: usize) -> Vec<NewsArticle> {
    (0..count)
        .map(|i| article(&format!("{prefix}-{i}")))
        .collect()
}
