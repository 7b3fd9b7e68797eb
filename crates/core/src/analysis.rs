//! Structured investor-focused analysis schema.
//!
//! The enrichment collaborator returns this exact shape; anything that does
//! not deserialize (or fails [`NewsAnalysis::validate`]) is treated as an
//! analysis error at the collaborator boundary, never as a crash.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Overall sentiment for an investor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

/// Expected impact direction for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactDirection {
    Positive,
    Negative,
    Neutral,
}

/// Magnitude of the expected impact for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Magnitude {
    Low,
    Medium,
    High,
}

/// Relevant time horizon for the article's impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeHorizon {
    #[serde(rename = "Short-term")]
    ShortTerm,
    #[serde(rename = "Medium-term")]
    MediumTerm,
    #[serde(rename = "Long-term")]
    LongTerm,
}

/// Structured analysis of one news article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsAnalysis {
    pub sentiment: Sentiment,
    /// Confidence score in [0.0, 1.0].
    pub confidence: f64,
    /// Companies, tickers, indexes, or sectors mentioned.
    pub affected_entities: Vec<String>,
    /// Entity -> expected impact direction.
    pub impact_direction: HashMap<String, ImpactDirection>,
    /// Entity -> magnitude of the expected impact.
    pub magnitude: HashMap<String, Magnitude>,
    /// Key performance indicators or financial metrics mentioned.
    pub key_indicators: Vec<String>,
    /// Potential risks or concerns identified in the article.
    pub risks: Vec<String>,
    /// Potential opportunities identified.
    pub opportunities: Vec<String>,
    pub time_horizon: TimeHorizon,
    /// Sector -> overall sentiment.
    pub sector_context: HashMap<String, Sentiment>,
    /// Concise, fact-based summary for an investor.
    pub summary_explanation: String,
    /// Inference speed in tokens per second, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_per_second: Option<f64>,
}

impl NewsAnalysis {
    /// Neutral/default payload substituted when the enrichment call fails,
    /// so one bad analysis never blocks the pipeline.
    pub fn fallback(reason: &str) -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            confidence: 0.0,
            affected_entities: Vec::new(),
            impact_direction: HashMap::new(),
            magnitude: HashMap::new(),
            key_indicators: Vec::new(),
            risks: vec!["Analysis failed due to API or parsing error.".into()],
            opportunities: Vec::new(),
            time_horizon: TimeHorizon::ShortTerm,
            sector_context: HashMap::new(),
            summary_explanation: format!("Could not perform analysis due to an error: {reason}"),
            tokens_per_second: None,
        }
    }

    /// Checks the bounds the schema cannot express through serde alone.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(Error::invalid_analysis(format!(
                "confidence {} outside [0.0, 1.0]",
                self.confidence
            )));
        }
        Ok(())
    }

    /// Whether this is the neutral payload produced by [`Self::fallback`].
    pub fn is_fallback(&self) -> bool {
        self.sentiment == Sentiment::Neutral
            && self.confidence == 0.0
            && self.summary_explanation.starts_with("Could not perform analysis")
    }
}
