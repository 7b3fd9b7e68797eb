//! LLM analysis client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use newswire_core::{Error, NewsAnalysis, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::prompts;

/// Result of one enrichment call: the validated analysis plus the usage
/// data callers need to derive throughput.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub analysis: NewsAnalysis,
    pub completion_tokens: Option<u64>,
    pub api_time: Duration,
}

impl AnalysisOutcome {
    /// Inference speed in tokens per second, rounded to two decimals.
    pub fn tokens_per_second(&self) -> Option<f64> {
        let tokens = self.completion_tokens?;
        let secs = self.api_time.as_secs_f64();
        if tokens == 0 || secs <= 0.0 {
            return None;
        }
        Some((tokens as f64 / secs * 100.0).round() / 100.0)
    }
}

/// External analysis step. May fail; callers substitute the fallback
/// payload rather than propagate.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, content: &str) -> Result<AnalysisOutcome>;
}

/// Analyzer backed by an OpenAI-compatible chat-completions endpoint with
/// native structured output.
pub struct LlmAnalyzer {
    client: reqwest::Client,
    config: AnalysisConfig,
}

impl LlmAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::analysis(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn request_body(&self, content: &str) -> serde_json::Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": prompts::SYSTEM_PROMPT },
                { "role": "user", "content": prompts::user_prompt(content) },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "news_analysis",
                    "schema": prompts::response_schema(),
                }
            },
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        })
    }
}

#[async_trait]
impl Analyzer for LlmAnalyzer {
    async fn analyze(&self, content: &str) -> Result<AnalysisOutcome> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(content))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Analysis request failed");
                Error::analysis(format!("analysis request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Analysis endpoint returned error");
            return Err(Error::analysis(format!(
                "analysis endpoint returned {status}: {body}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::analysis(format!("failed to read analysis response: {e}")))?;
        let api_time = start.elapsed();

        let outcome = parse_completion(&body, api_time)?;
        debug!(
            api_time_ms = api_time.as_millis() as u64,
            tokens_per_second = ?outcome.tokens_per_second(),
            "Analysis complete"
        );
        Ok(outcome)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    completion_tokens: Option<u64>,
}

/// Parses a chat-completion body into a validated analysis outcome.
fn parse_completion(body: &[u8], api_time: Duration) -> Result<AnalysisOutcome> {
    let completion: ChatCompletion = serde_json::from_slice(body)
        .map_err(|e| Error::analysis(format!("malformed completion response: {e}")))?;

    let content = completion
        .choices
        .first()
        .and_then(|c| c.message.content.as_deref())
        .ok_or_else(|| Error::analysis("completion response has no content"))?;

    let mut analysis: NewsAnalysis = serde_json::from_str(content)
        .map_err(|e| Error::invalid_analysis(format!("analysis JSON does not match schema: {e}")))?;
    analysis.validate()?;

    let completion_tokens = completion.usage.and_then(|u| u.completion_tokens);

    let mut outcome = AnalysisOutcome {
        analysis,
        completion_tokens,
        api_time,
    };
    outcome.analysis.tokens_per_second = outcome.tokens_per_second();

    Ok(outcome)
}
