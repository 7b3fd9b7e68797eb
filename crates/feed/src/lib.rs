//! News feed collaborator.
//!
//! The pipeline talks to the feed through the [`NewsFeed`] trait so tests
//! can script fetch results; [`GoogleNewsFeed`] is the production
//! implementation backed by the Google News RSS search endpoint.

pub mod config;
pub mod google_news;

pub use config::FeedConfig;
pub use google_news::{GoogleNewsFeed, NewsFeed};
